//! The generator contract and the shipped backends.
//!
//! A driver picks a [`GeneratorKind`], builds it once, then calls
//! [`Generator::generate`] followed by [`Generator::execute`]. Everything
//! that touches the filesystem happens in `execute`.
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::codegen::Codegen;
use crate::config::{GeneratorConfig, PackageConfig};
use crate::error::Error;
use crate::ir;
use crate::schema::Schema;

pub trait Generator {
    fn name(&self) -> &'static str;

    /// Compute the emission model. No I/O.
    fn generate(&mut self, schema: &Schema, config: &GeneratorConfig, package: &PackageConfig) -> Result<(), Error>;

    /// Render and write what `generate` produced.
    fn execute(&mut self, config: &GeneratorConfig, package: &PackageConfig) -> Result<(), Error>;
}

/// Available backends, selectable by name from config or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    TypeGen,
}

impl GeneratorKind {
    pub fn build(self) -> Box<dyn Generator> {
        match self {
            GeneratorKind::TypeGen => Box::new(TypeGen::default()),
        }
    }
}

impl FromStr for GeneratorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "typegen" => Ok(GeneratorKind::TypeGen),
            other => Err(Error::UnknownGenerator(other.to_string())),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorKind::TypeGen => f.write_str("typegen"),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPEGEN
// ————————————————————————————————————————————————————————————————————————————

/// Emits Go type declarations for a package's configured types.
#[derive(Debug, Default)]
pub struct TypeGen {
    package: Option<ir::Package>,
}

impl TypeGen {
    /// The emission model from the last `generate`, if any.
    pub fn package(&self) -> Option<&ir::Package> {
        self.package.as_ref()
    }

    /// Source text for the last `generate`, without writing it anywhere.
    pub fn render(&self) -> Option<String> {
        self.package.as_ref().map(|package| {
            let mut cg = Codegen::new();
            cg.emit(package);
            cg.into_string()
        })
    }

    pub fn output_path(config: &GeneratorConfig, package: &PackageConfig) -> PathBuf {
        package.path.join(&config.file_name)
    }
}

impl Generator for TypeGen {
    fn name(&self) -> &'static str {
        "typegen"
    }

    fn generate(&mut self, schema: &Schema, _config: &GeneratorConfig, package: &PackageConfig) -> Result<(), Error> {
        let _span = tracing::info_span!("generate", generator = self.name(), package = %package.name).entered();
        let lowered = crate::lower::lower_package(schema, package)?;
        tracing::info!(types = lowered.decls.len(), "generated declarations");
        self.package = Some(lowered);
        Ok(())
    }

    fn execute(&mut self, config: &GeneratorConfig, package: &PackageConfig) -> Result<(), Error> {
        let source = self.render().ok_or(Error::NotGenerated(self.name()))?;
        let path = Self::output_path(config, package);
        let write_error = |source: std::io::Error| Error::Write { path: path.clone(), source };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(&path, source).map_err(write_error)?;
        tracing::info!(path = %path.display(), package = %package.name, "wrote generated types");
        Ok(())
    }
}
