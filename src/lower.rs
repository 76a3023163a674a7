use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};

use crate::codegen::naming::go_name;
use crate::config::PackageConfig;
use crate::error::{Error, ResolveError};
use crate::ir::{Decl, EnumDecl, EnumMember, Package, ScalarDecl, StructDecl, StructField};
use crate::schema::{is_builtin_scalar, Field, Kind, Schema, Type};
use crate::synth;

/// Lower the package's configured types, and every type they reach through
/// fields or union members, into declarations.
///
/// Built-in scalars and types with a `field_type_override` are referenced
/// but never declared.
pub fn lower_package(schema: &Schema, package: &PackageConfig) -> Result<Package, Error> {
    let types = schema.index();
    let mut queue: VecDeque<String> = package.types().iter().map(|t| t.name.clone()).collect();
    let mut seen = IndexSet::<String>::new();
    // Go identifier to the schema name that claimed it, package scope.
    let mut idents = IndexMap::<String, String>::new();
    let mut decls = Vec::new();

    while let Some(name) = queue.pop_front() {
        if !seen.insert(name.clone())
            || is_builtin_scalar(&name)
            || package.field_type_override(&name).is_some()
        {
            continue;
        }
        let Some(ty) = types.get(name.as_str()) else {
            tracing::warn!(name = %name, package = %package.name, "type not found in schema, skipping");
            continue;
        };
        let decl = match ty.kind {
            Kind::Object | Kind::Interface | Kind::InputObject => {
                Decl::Struct(lower_struct(ty, package, &mut queue)?)
            }
            Kind::Enum => Decl::Enum(lower_enum(ty, &package.name, &mut idents)?),
            Kind::Scalar => Decl::Scalar(ScalarDecl {
                name: go_name(&ty.name),
                description: ty.description.clone(),
                underlying: "string".to_string(),
            }),
            Kind::Union => {
                queue.extend(
                    ty.possible_types
                        .iter()
                        .map(|t| t.type_name().to_string())
                        .filter(|n| !n.is_empty()),
                );
                Decl::Scalar(ScalarDecl {
                    name: go_name(&ty.name),
                    description: ty.description.clone(),
                    underlying: "interface{}".to_string(),
                })
            }
            Kind::List | Kind::NonNull => {
                tracing::warn!(name = %name, kind = %ty.kind, "named type with a wrapper kind, skipping");
                continue;
            }
        };
        claim(&mut idents, &package.name, decl.name(), &name)?;
        tracing::trace!(name = %name, kind = %ty.kind, "lowered type");
        decls.push(decl);
    }

    decls.sort_by(|a, b| a.name().cmp(b.name()));
    Ok(Package { name: package.name.clone(), decls })
}

fn lower_struct(ty: &Type, package: &PackageConfig, queue: &mut VecDeque<String>) -> Result<StructDecl, Error> {
    let mut fields = Vec::with_capacity(ty.struct_fields().len());
    let mut idents = IndexMap::<String, String>::new();
    for field in ty.struct_fields() {
        let name = field.go_name();
        claim(&mut idents, &ty.name, &name, &field.name)?;
        let (type_expr, base) = field_type(field, package).map_err(|source| Error::Field {
            owner: ty.name.clone(),
            field: field.name.clone(),
            source,
        })?;
        queue.push_back(base);
        fields.push(StructField {
            name,
            type_expr,
            tags: synth::resolve_tags(field, &ty.name, package),
            description: field.description.clone(),
        });
    }
    Ok(StructDecl {
        name: go_name(&ty.name),
        description: ty.description.clone(),
        fields,
    })
}

fn lower_enum(ty: &Type, scope: &str, idents: &mut IndexMap<String, String>) -> Result<EnumDecl, Error> {
    let name = go_name(&ty.name);
    let mut values = Vec::with_capacity(ty.enum_values.len());
    for v in &ty.enum_values {
        let const_name = format!("{name}{}", go_name(&v.name));
        claim(idents, scope, &const_name, &format!("{}.{}", ty.name, v.name))?;
        values.push(EnumMember {
            const_name,
            value: v.name.clone(),
            description: v.description.clone(),
            deprecation: v.is_deprecated.then(|| {
                v.deprecation_reason.clone().unwrap_or_else(|| "no longer supported".to_string())
            }),
        });
    }
    Ok(EnumDecl { name, description: ty.description.clone(), values })
}

/// Record that `source` maps to `ident` within `owner`, failing if another
/// name already took it.
fn claim(idents: &mut IndexMap<String, String>, owner: &str, ident: &str, source: &str) -> Result<(), Error> {
    match idents.get(ident) {
        Some(first) => Err(Error::NameCollision {
            owner: owner.to_string(),
            ident: ident.to_string(),
            first: first.clone(),
            second: source.to_string(),
        }),
        None => {
            idents.insert(ident.to_string(), source.to_string());
            Ok(())
        }
    }
}

/// Go type expression for a field, plus the base schema type it refers to.
///
/// Lists become `[]` prefixes; a nullable, unlisted struct-like base gets a
/// pointer. An override is used verbatim and never decorated with a pointer.
fn field_type(field: &Field, package: &PackageConfig) -> Result<(String, String), ResolveError> {
    let base = field.type_ref.resolve()?;
    let overridden = package.field_type_override(base.name).is_some();
    let ident = if overridden {
        synth::resolve_type_name(field, package)?
    } else {
        builtin_go_type(base.name).map(str::to_string).unwrap_or_else(|| go_name(base.name))
    };
    let lists = field.type_ref.wrappers().filter(|k| *k == Kind::List).count();
    let pointer = !overridden
        && lists == 0
        && !field.type_ref.is_non_null()
        && matches!(base.kind, Kind::Object | Kind::Interface | Kind::InputObject);

    let expr = format!("{}{}{ident}", "[]".repeat(lists), if pointer { "*" } else { "" });
    Ok((expr, base.name.to_string()))
}

fn builtin_go_type(name: &str) -> Option<&'static str> {
    match name {
        "Boolean" => Some("bool"),
        "Float" => Some("float64"),
        "ID" | "String" => Some("string"),
        "Int" => Some("int"),
        _ => None,
    }
}
