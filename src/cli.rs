//! Minimal CLI: load schema + config → (generate | inspect)
use std::path::PathBuf;
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, Args};
use colored::Colorize;

use graphql_typegen::config::{Config, PackageConfig, DEFAULT_CONFIG_FILE};
use graphql_typegen::generator::{Generator, GeneratorKind};
use graphql_typegen::inspect::inspect_type;
use graphql_typegen::schema::Schema;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate typed Go source from a saved GraphQL introspection result
#[derive(Parser, Debug)]
#[command(name = "graphql-typegen", version)]
pub struct CommandLineInterface {
    #[command(flatten)]
    global: GlobalSettings,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// run every configured generator for the selected packages
    Generate(GenerateCmd),
    /// print how each field of one type resolves (JSON)
    Inspect(InspectCmd),
}

#[derive(Args, Debug, Clone)]
struct GlobalSettings {
    /// path to a configuration file
    #[arg(long, short, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, short = 'l', global = true)]
    log_level: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct SchemaSettings {
    /// introspection result to read (defaults to `cache.schema_file` from the config)
    #[arg(long, short)]
    schema: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct GenerateCmd {
    #[command(flatten)]
    schema_settings: SchemaSettings,

    /// only generate these packages (all configured packages if omitted)
    #[arg(long, short)]
    package: Vec<String>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct InspectCmd {
    #[command(flatten)]
    schema_settings: SchemaSettings,

    /// schema type to inspect
    #[arg(long = "type", short = 't')]
    type_name: String,

    /// package whose overrides apply (none if omitted)
    #[arg(long, short)]
    package: Option<String>,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl SchemaSettings {
    fn load(&self, config: &Config) -> Result<Schema> {
        let path = self.schema.as_ref().unwrap_or(&config.cache.schema_file);
        let schema = Schema::load(path)?;
        tracing::info!(path = %path.display(), types = schema.types.len(), "loaded schema");
        Ok(schema)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.global.config
    }

    /// `None` when the config file does not exist.
    pub fn load_config(&self) -> Result<Option<Config>> {
        Ok(Config::load(&self.global.config)?)
    }

    /// Command line first, then the config file, then `info`.
    pub fn log_level<'a>(&'a self, config: &'a Config) -> &'a str {
        self.global
            .log_level
            .as_deref()
            .or(config.log_level.as_deref())
            .unwrap_or("info")
    }

    pub fn run(&self, config: &Config) -> Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    eprintln!("{config:#?}");
                    return Ok(());
                }

                let schema = target.schema_settings.load(config)?;
                let packages = select_packages(config, &target.package)?;
                if packages.is_empty() {
                    tracing::warn!("no packages configured, nothing to generate");
                }
                for package in packages {
                    if package.generators.is_empty() {
                        tracing::warn!(package = %package.name, "package has no generators configured");
                    }
                    for name in &package.generators {
                        let kind: GeneratorKind = name.parse()?;
                        let generator_config = config.generator(name);
                        let mut generator = kind.build();
                        generator
                            .generate(&schema, &generator_config, package)
                            .with_context(|| format!("{kind}: generating package '{}'", package.name))?;
                        generator
                            .execute(&generator_config, package)
                            .with_context(|| format!("{kind}: writing package '{}'", package.name))?;
                        eprintln!(
                            "{} {} ({kind}) → {}",
                            "generated".green().bold(),
                            package.name,
                            package.path.join(&generator_config.file_name).display()
                        );
                    }
                }
                Ok(())
            }
            Command::Inspect(target) => {
                let schema = target.schema_settings.load(config)?;
                let unconfigured = PackageConfig::new("inspect", Vec::new());
                let package = match target.package.as_deref() {
                    Some(name) => config
                        .package(name)
                        .ok_or_else(|| anyhow!("package '{name}' is not in the config"))?,
                    None => &unconfigured,
                };

                let report = inspect_type(&schema, &target.type_name, package)?
                    .ok_or_else(|| anyhow!("type '{}' is not in the schema", target.type_name))?;
                let report_src = serde_json::to_string_pretty(&report)?;
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("creating {}", parent.display()))?;
                    }
                    std::fs::write(out, &report_src)
                        .with_context(|| format!("writing {}", out.display()))?;
                } else {
                    println!("{report_src}");
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn select_packages<'a>(config: &'a Config, names: &[String]) -> Result<Vec<&'a PackageConfig>> {
    if names.is_empty() {
        return Ok(config.packages.iter().collect());
    }
    names
        .iter()
        .map(|name| {
            config
                .package(name)
                .ok_or_else(|| anyhow!("package '{name}' is not in the config"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parses_generate_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "graphql-typegen", "-c", "cfg.yml", "generate", "--schema", "s.json", "-p", "alerts", "-p", "apm",
        ])
        .unwrap();
        assert_eq!(cli.config_path(), &PathBuf::from("cfg.yml"));
        let Command::Generate(target) = &cli.cmd else { panic!("expected generate") };
        assert_eq!(target.schema_settings.schema, Some(PathBuf::from("s.json")));
        assert_eq!(target.package, vec!["alerts".to_string(), "apm".to_string()]);
    }

    #[test]
    fn log_level_precedence() {
        let config = Config::from_yaml_str("log_level: debug\n", Path::new("t.yml")).unwrap();
        let plain = CommandLineInterface::try_parse_from(["graphql-typegen", "inspect", "-t", "Query"]).unwrap();
        assert_eq!(plain.log_level(&config), "debug");
        assert_eq!(plain.log_level(&Config::default()), "info");
        let flagged =
            CommandLineInterface::try_parse_from(["graphql-typegen", "inspect", "-t", "Query", "-l", "trace"]).unwrap();
        assert_eq!(flagged.log_level(&config), "trace");
    }

    #[test]
    fn unknown_package_is_rejected() {
        let config = Config::from_yaml_str("packages:\n  - name: alerts\n", Path::new("t.yml")).unwrap();
        assert_eq!(select_packages(&config, &[]).unwrap().len(), 1);
        assert!(select_packages(&config, &["apm".to_string()]).is_err());
    }
}
