//! Runs every fixture package through `TypeGen` in memory and checks each
//! emitted struct tag against the tag grammar.
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use graphql_typegen::config::Config;
use graphql_typegen::generator::{Generator, TypeGen};
use graphql_typegen::schema::Schema;

/// One backtick block of `ns:"name[,omitempty]"` entries separated by single spaces.
static TAG_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^`[a-z]+:"[A-Za-z_][A-Za-z0-9_]*(,omitempty)?"( [a-z]+:"[A-Za-z_][A-Za-z0-9_]*(,omitempty)?")*`$"#)
        .expect("tag grammar")
});

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("fixtures")
}

fn main() -> Result<()> {
    let dir = fixtures_dir();
    let config = Config::load(&dir.join("typegen.yml"))?
        .ok_or_else(|| anyhow!("missing fixtures/typegen.yml"))?;
    let schema = Schema::load(&dir.join("schema.json"))?;

    let mut failures = 0usize;
    for package in &config.packages {
        let generator_config = config.generator("typegen");
        let mut typegen = TypeGen::default();
        typegen
            .generate(&schema, &generator_config, package)
            .with_context(|| format!("generating {}", package.name))?;
        let src = typegen.render().context("render after generate")?;

        let mut checked = 0usize;
        for line in src.lines().filter(|l| l.starts_with('\t') && l.ends_with('`')) {
            let Some(start) = line.find('`') else { continue };
            let tags = &line[start..];
            checked += 1;
            if !TAG_BLOCK.is_match(tags) {
                failures += 1;
                eprintln!("❌ {}: bad tag block: {tags}", package.name);
            }
        }
        eprintln!("✅ {}: {checked} tag blocks checked", package.name);
    }

    if failures > 0 {
        bail!("{failures} malformed tag block(s)");
    }
    Ok(())
}
