//! Generation configuration.
//!
//! Loaded once from YAML and read-only afterwards. A `PackageConfig` builds
//! its [`TypeIndex`] at construction so lookups never rescan `types`.
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Error;

pub const DEFAULT_CONFIG_FILE: &str = ".graphql-typegen.yml";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub cache: CacheConfig,
    pub packages: Vec<PackageConfig>,
    pub generators: Vec<GeneratorConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Saved introspection result to generate from.
    pub schema_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    pub name: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

/// Per-package generation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "PackageConfigDef")]
pub struct PackageConfig {
    pub name: String,
    /// Output directory for this package's generated files.
    pub path: PathBuf,
    pub generators: Vec<String>,
    types: Vec<TypeConfig>,
    index: TypeIndex,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeConfig {
    pub name: String,
    /// Replaces the generated type name of every field whose base type is
    /// `name`. Empty means no override.
    #[serde(default)]
    pub field_type_override: String,
    #[serde(default)]
    pub struct_tags: Option<StructTags>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StructTags {
    #[serde(default)]
    pub tags: Vec<String>,
    /// Unset, forced on, or forced off.
    #[serde(default)]
    pub omit_empty: Option<bool>,
}

/// Name-keyed view over a package's `types`.
///
/// Duplicate entries for one name resolve last-match-wins: the last
/// `TypeConfig` with that name is the one returned by lookups, and the last
/// entry with a non-empty `field_type_override` supplies the override.
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    overrides: IndexMap<String, String>,
    configs: IndexMap<String, usize>,
}

#[derive(Deserialize)]
struct PackageConfigDef {
    name: String,
    #[serde(default = "default_package_path")]
    path: PathBuf,
    #[serde(default)]
    generators: Vec<String>,
    #[serde(default)]
    types: Vec<TypeConfig>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Config {
    /// Read the config file. A missing file yields `None` so the caller can
    /// fall back to defaults.
    pub fn load(path: &Path) -> Result<Option<Self>, Error> {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(Error::Read { path: path.to_path_buf(), source }),
        };
        Self::from_yaml_str(&source, path).map(Some)
    }

    pub fn from_yaml_str(source: &str, origin: &Path) -> Result<Self, Error> {
        crate::path_de::yaml_from_str(source, origin)
    }

    pub fn package(&self, name: &str) -> Option<&PackageConfig> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Generator settings by name, or the defaults when none are configured.
    pub fn generator(&self, name: &str) -> GeneratorConfig {
        self.generators
            .iter()
            .find(|g| g.name == name)
            .cloned()
            .unwrap_or_else(|| GeneratorConfig::named(name))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { schema_file: PathBuf::from("schema.json") }
    }
}

impl GeneratorConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), file_name: default_file_name() }
    }
}

impl PackageConfig {
    pub fn new(name: impl Into<String>, types: Vec<TypeConfig>) -> Self {
        let index = TypeIndex::build(&types);
        Self {
            name: name.into(),
            path: default_package_path(),
            generators: Vec::new(),
            types,
            index,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_generators(mut self, generators: Vec<String>) -> Self {
        self.generators = generators;
        self
    }

    /// Configured types, in file order.
    pub fn types(&self) -> &[TypeConfig] {
        &self.types
    }

    /// The `TypeConfig` for `name`; the last one if several share the name.
    pub fn type_config(&self, name: &str) -> Option<&TypeConfig> {
        self.index.configs.get(name).map(|&i| &self.types[i])
    }

    /// The effective `field_type_override` for `name`, if any.
    pub fn field_type_override(&self, name: &str) -> Option<&str> {
        self.index.overrides.get(name).map(String::as_str)
    }
}

impl From<PackageConfigDef> for PackageConfig {
    fn from(def: PackageConfigDef) -> Self {
        Self::new(def.name, def.types)
            .with_path(def.path)
            .with_generators(def.generators)
    }
}

impl TypeConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_override(mut self, field_type_override: impl Into<String>) -> Self {
        self.field_type_override = field_type_override.into();
        self
    }

    pub fn with_struct_tags(mut self, tags: &[&str], omit_empty: Option<bool>) -> Self {
        self.struct_tags = Some(StructTags {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            omit_empty,
        });
        self
    }
}

impl TypeIndex {
    pub fn build(types: &[TypeConfig]) -> Self {
        let mut index = Self::default();
        for (i, type_config) in types.iter().enumerate() {
            if let Some(previous) = index.configs.insert(type_config.name.clone(), i) {
                tracing::debug!(
                    name = %type_config.name,
                    previous,
                    current = i,
                    "duplicate type config; the later entry wins"
                );
            }
            if !type_config.field_type_override.is_empty() {
                tracing::trace!(
                    name = %type_config.name,
                    field_type_override = %type_config.field_type_override,
                    "registering type override"
                );
                index
                    .overrides
                    .insert(type_config.name.clone(), type_config.field_type_override.clone());
            }
        }
        index
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn default_file_name() -> String {
    "types.go".to_string()
}

fn default_package_path() -> PathBuf {
    PathBuf::from(".")
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
log_level: debug
cache:
  schema_file: fixtures/schema.json
packages:
  - name: alerts
    path: pkg/alerts
    generators: [typegen]
    types:
      - name: AlertsPolicy
      - name: EpochMilliseconds
        field_type_override: "*time.Time"
      - name: AlertsPolicyInput
        struct_tags:
          tags: [json, yaml]
          omit_empty: false
generators:
  - name: typegen
    file_name: alerts_types.go
"#;

    #[test]
    fn loads_yaml_config() {
        let config = Config::from_yaml_str(SAMPLE, Path::new("test.yml")).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.cache.schema_file, PathBuf::from("fixtures/schema.json"));

        let alerts = config.package("alerts").unwrap();
        assert_eq!(alerts.path, PathBuf::from("pkg/alerts"));
        assert_eq!(alerts.generators, vec!["typegen".to_string()]);
        assert_eq!(alerts.types().len(), 3);
        assert_eq!(alerts.field_type_override("EpochMilliseconds"), Some("*time.Time"));
        assert_eq!(alerts.field_type_override("AlertsPolicy"), None);

        let tags = alerts.type_config("AlertsPolicyInput").and_then(|t| t.struct_tags.as_ref());
        assert_eq!(
            tags,
            Some(&StructTags { tags: vec!["json".into(), "yaml".into()], omit_empty: Some(false) })
        );

        assert_eq!(config.generator("typegen").file_name, "alerts_types.go");
        assert_eq!(config.generator("other").file_name, "types.go");
    }

    #[test]
    fn defaults_apply_to_sparse_config() {
        let config = Config::from_yaml_str("packages:\n  - name: bare\n", Path::new("t.yml")).unwrap();
        let bare = config.package("bare").unwrap();
        assert_eq!(bare.path, PathBuf::from("."));
        assert!(bare.generators.is_empty());
        assert_eq!(config.cache.schema_file, PathBuf::from("schema.json"));
    }

    #[test]
    fn unset_omit_empty_stays_unset() {
        let src = "packages:\n  - name: p\n    types:\n      - name: T\n        struct_tags:\n          tags: [json]\n";
        let config = Config::from_yaml_str(src, Path::new("t.yml")).unwrap();
        let tags = config.packages[0].type_config("T").unwrap().struct_tags.clone().unwrap();
        assert_eq!(tags.omit_empty, None);
    }

    #[test]
    fn last_override_wins() {
        let package = PackageConfig::new(
            "p",
            vec![
                TypeConfig::named("Foo").with_override("A"),
                TypeConfig::named("Foo").with_override("B"),
            ],
        );
        assert_eq!(package.field_type_override("Foo"), Some("B"));
    }

    #[test]
    fn empty_override_does_not_erase_earlier_one() {
        let package = PackageConfig::new(
            "p",
            vec![
                TypeConfig::named("Foo").with_override("A"),
                TypeConfig::named("Foo").with_struct_tags(&["yaml"], None),
            ],
        );
        assert_eq!(package.field_type_override("Foo"), Some("A"));
        // ...while the config lookup still returns the later entry.
        let last = package.type_config("Foo").unwrap();
        assert!(last.field_type_override.is_empty());
        assert!(last.struct_tags.is_some());
    }

    #[test]
    fn index_keeps_first_appearance_order() {
        let index = TypeIndex::build(&[
            TypeConfig::named("Zeta").with_override("Z1"),
            TypeConfig::named("Alpha"),
            TypeConfig::named("Zeta").with_override("Z2"),
        ]);
        let names: Vec<&str> = index.configs.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert_eq!(index.configs.get("Zeta"), Some(&2));
        assert_eq!(index.overrides.get("Zeta").map(String::as_str), Some("Z2"));
    }

    #[test]
    fn config_errors_carry_the_key_path() {
        let src = "packages:\n  - name: p\n    types:\n      - name: T\n        struct_tags:\n          omit_empty: sometimes\n";
        match Config::from_yaml_str(src, Path::new("t.yml")).unwrap_err() {
            Error::Parse { location, .. } => {
                assert_eq!(location, "packages[0].types[0].struct_tags.omit_empty")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(&dir.path().join("absent.yml")).unwrap().is_none());
    }
}
