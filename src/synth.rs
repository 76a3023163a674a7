//! Final type names and struct tags for generated fields.
//!
//! Tags use the form `` `<namespace>:"<field>[,omitempty]"` ``, one entry per
//! namespace separated by single spaces, all inside one backtick block.
use crate::config::{PackageConfig, StructTags};
use crate::error::ResolveError;
use crate::schema::Field;

const DEFAULT_NAMESPACE: &str = "json";

/// The field's base type name, or the package's override for it.
///
/// Duplicate `TypeConfig` entries are settled by the package's index: the
/// last non-empty `field_type_override` for a name wins.
pub fn resolve_type_name(field: &Field, package: &PackageConfig) -> Result<String, ResolveError> {
    let base = field.type_ref.resolve()?;
    match package.field_type_override(base.name) {
        Some(replacement) => {
            tracing::trace!(name = base.name, field_type_override = replacement, "overriding typeref");
            Ok(replacement.to_string())
        }
        None => Ok(base.name.to_string()),
    }
}

/// `` `json:"<name>"` ``, with `,omitempty` for nullable and input-object fields.
pub fn default_tag(field: &Field) -> String {
    render_tags(&[DEFAULT_NAMESPACE], &field.name, can_omit_empty(field))
}

/// Tags for `field` as a member of `parent_type`, honoring the parent's
/// `struct_tags` configuration when there is one.
pub fn resolve_tags(field: &Field, parent_type: &str, package: &PackageConfig) -> String {
    match package.type_config(parent_type).and_then(|t| t.struct_tags.as_ref()) {
        Some(struct_tags) => tags_with_override(field, struct_tags),
        None => default_tag(field),
    }
}

fn tags_with_override(field: &Field, struct_tags: &StructTags) -> String {
    let namespaces: Vec<&str> = match (struct_tags.tags.is_empty(), struct_tags.omit_empty) {
        (true, None) => return default_tag(field),
        (true, Some(_)) => vec![DEFAULT_NAMESPACE],
        (false, _) => struct_tags.tags.iter().map(String::as_str).collect(),
    };
    let omit_empty = struct_tags.omit_empty.unwrap_or(true) && can_omit_empty(field);
    render_tags(&namespaces, &field.name, omit_empty)
}

/// Input objects always allow `omitempty`; other fields only when nullable.
fn can_omit_empty(field: &Field) -> bool {
    field.type_ref.is_input_object() || !field.type_ref.is_non_null()
}

fn render_tags(namespaces: &[&str], field_name: &str, omit_empty: bool) -> String {
    let suffix = if omit_empty { ",omitempty" } else { "" };
    let body = namespaces
        .iter()
        .map(|ns| format!("{ns}:\"{field_name}{suffix}\""))
        .collect::<Vec<_>>()
        .join(" ");
    format!("`{body}`")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TypeConfig;
    use crate::schema::{Kind, TypeRef};

    fn nullable(name: &str) -> Field {
        Field::new(name, TypeRef::named(Kind::Scalar, "String"))
    }

    fn required(name: &str) -> Field {
        Field::new(name, TypeRef::non_null(TypeRef::named(Kind::Scalar, "ID")))
    }

    fn required_input(name: &str) -> Field {
        Field::new(name, TypeRef::non_null(TypeRef::named(Kind::InputObject, "Filter")))
    }

    fn package_with_tags(tags: &[&str], omit_empty: Option<bool>) -> PackageConfig {
        PackageConfig::new("p", vec![TypeConfig::named("Parent").with_struct_tags(tags, omit_empty)])
    }

    #[test]
    fn default_tag_follows_nullability() {
        assert_eq!(default_tag(&nullable("name")), "`json:\"name,omitempty\"`");
        assert_eq!(default_tag(&required("id")), "`json:\"id\"`");
        assert_eq!(default_tag(&required_input("filter")), "`json:\"filter,omitempty\"`");
    }

    #[test]
    fn default_tag_on_malformed_reference_still_renders() {
        let field = Field::new("x", TypeRef { kind: Kind::NonNull, name: None, of_type: None });
        assert_eq!(default_tag(&field), "`json:\"x\"`");
    }

    #[test]
    fn override_last_match_wins() {
        let package = PackageConfig::new(
            "p",
            vec![
                TypeConfig::named("Foo").with_override("A"),
                TypeConfig::named("Foo").with_override("B"),
            ],
        );
        let field = Field::new("foo", TypeRef::list(TypeRef::named(Kind::Object, "Foo")));
        assert_eq!(resolve_type_name(&field, &package).unwrap(), "B");
    }

    #[test]
    fn no_override_yields_base_name() {
        let package = PackageConfig::new("p", vec![TypeConfig::named("Bar").with_override("X")]);
        let field = Field::new("foo", TypeRef::non_null(TypeRef::named(Kind::Object, "Foo")));
        assert_eq!(resolve_type_name(&field, &package).unwrap(), "Foo");
    }

    #[test]
    fn type_name_resolution_fails_on_malformed_reference() {
        let package = PackageConfig::new("p", Vec::new());
        let field = Field::new("foo", TypeRef { kind: Kind::List, name: None, of_type: None });
        assert_eq!(
            resolve_type_name(&field, &package),
            Err(ResolveError::Malformed { kind: Kind::List, depth: 0 })
        );
    }

    #[test]
    fn multiple_namespaces_without_omitempty() {
        let package = package_with_tags(&["json", "yaml"], Some(false));
        assert_eq!(resolve_tags(&nullable("id"), "Parent", &package), "`json:\"id\" yaml:\"id\"`");
    }

    #[test]
    fn multiple_namespaces_with_default_omitempty() {
        let package = package_with_tags(&["json", "yaml"], None);
        assert_eq!(
            resolve_tags(&nullable("id"), "Parent", &package),
            "`json:\"id,omitempty\" yaml:\"id,omitempty\"`"
        );
        // The nullability gate still applies.
        assert_eq!(resolve_tags(&required("id"), "Parent", &package), "`json:\"id\" yaml:\"id\"`");
    }

    #[test]
    fn empty_tags_with_omit_set_means_json() {
        let forced = package_with_tags(&[], Some(true));
        let explicit = package_with_tags(&["json"], Some(true));
        for field in [nullable("a"), required("b"), required_input("c")] {
            assert_eq!(
                resolve_tags(&field, "Parent", &forced),
                resolve_tags(&field, "Parent", &explicit)
            );
        }
        assert_eq!(resolve_tags(&nullable("a"), "Parent", &forced), "`json:\"a,omitempty\"`");
        assert_eq!(resolve_tags(&required("b"), "Parent", &forced), "`json:\"b\"`");

        let off = package_with_tags(&[], Some(false));
        assert_eq!(resolve_tags(&nullable("a"), "Parent", &off), "`json:\"a\"`");
    }

    #[test]
    fn empty_tags_with_omit_unset_falls_back_to_default() {
        let package = package_with_tags(&[], None);
        for field in [nullable("a"), required("b"), required_input("c")] {
            assert_eq!(resolve_tags(&field, "Parent", &package), default_tag(&field));
        }
    }

    #[test]
    fn unconfigured_parent_uses_default() {
        let package = package_with_tags(&["yaml"], Some(false));
        assert_eq!(resolve_tags(&nullable("a"), "Other", &package), default_tag(&nullable("a")));
        let untagged = PackageConfig::new("p", vec![TypeConfig::named("Parent").with_override("X")]);
        assert_eq!(resolve_tags(&nullable("a"), "Parent", &untagged), default_tag(&nullable("a")));
    }

    #[test]
    fn single_namespace_has_no_trailing_space() {
        let package = package_with_tags(&["yaml"], None);
        let tags = resolve_tags(&nullable("name"), "Parent", &package);
        assert_eq!(tags, "`yaml:\"name,omitempty\"`");
        assert!(!tags.contains(" `") && !tags.ends_with(" "));
    }
}
