//! Debug view: how each field of a type resolves under a package config.
use serde::Serialize;

use crate::config::PackageConfig;
use crate::error::Error;
use crate::schema::{Field, Kind, Schema, Type};
use crate::synth;

#[derive(Debug, Serialize)]
pub struct TypeReport {
    pub name: String,
    pub kind: Kind,
    pub fields: Vec<FieldReport>,
}

#[derive(Debug, Serialize)]
pub struct FieldReport {
    pub name: String,
    pub go_name: String,
    pub base_type: String,
    pub base_kind: Kind,
    pub wrap_depth: usize,
    /// Base type name after overrides.
    pub resolved_type: String,
    pub tags: String,
    pub required: bool,
    pub list: bool,
    pub primitive: bool,
    #[serde(rename = "enum")]
    pub enum_: bool,
    pub scalar_id: bool,
    pub has_required_arg: bool,
}

/// `None` when the schema has no type called `type_name`.
pub fn inspect_type(schema: &Schema, type_name: &str, package: &PackageConfig) -> Result<Option<TypeReport>, Error> {
    let Some(ty) = schema.type_by_name(type_name) else {
        return Ok(None);
    };
    let fields = ty
        .struct_fields()
        .iter()
        .map(|field| field_report(ty, field, package))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(TypeReport { name: ty.name.clone(), kind: ty.kind, fields }))
}

fn field_report(owner: &Type, field: &Field, package: &PackageConfig) -> Result<FieldReport, Error> {
    let context = |source| Error::Field { owner: owner.name.clone(), field: field.name.clone(), source };
    let base = field.type_ref.resolve().map_err(context)?;
    let resolved_type = synth::resolve_type_name(field, package).map_err(context)?;
    Ok(FieldReport {
        name: field.name.clone(),
        go_name: field.go_name(),
        base_type: base.name.to_string(),
        base_kind: base.kind,
        wrap_depth: base.depth,
        resolved_type,
        tags: synth::resolve_tags(field, &owner.name, package),
        required: field.is_required(),
        list: field.type_ref.is_list(),
        primitive: field.is_primitive(),
        enum_: field.is_enum(),
        scalar_id: field.is_scalar_id(),
        has_required_arg: field.has_required_arg(),
    })
}
