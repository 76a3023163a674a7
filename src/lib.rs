//! Typed Go source generation from an introspected GraphQL schema.
//!
//! Pipeline: [`schema::Schema`] (loaded from a saved introspection result)
//! → [`resolve`] (unwrap `LIST`/`NON_NULL` chains) → [`synth`] (type-name
//! overrides and struct tags from [`config::PackageConfig`]) → [`lower`]
//! (emission model in [`ir`]) → [`codegen`] (Go source), driven through the
//! [`generator::Generator`] contract.
pub mod codegen;
pub mod config;
pub mod error;
pub mod generator;
pub mod inspect;
pub mod ir;
pub mod lower;
pub mod path_de;
pub mod resolve;
pub mod schema;
pub mod synth;

pub use error::{Error, ResolveError};
