//! Error types for schema resolution and generation.
use std::path::PathBuf;
use thiserror::Error;

use crate::schema::Kind;

/// A type reference whose wrapper chain never reaches a named base type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The chain ended (`ofType` absent) while still inside a wrapper.
    #[error("malformed type reference: chain ends at {kind} after {depth} wrapper(s) without reaching a named type")]
    Malformed { kind: Kind, depth: usize },

    /// The chain reached a base kind, but it carries no name.
    #[error("malformed type reference: base {kind} at depth {depth} has no name")]
    Unnamed { kind: Kind, depth: usize },
}

/// Errors that abort a generation pass.
#[derive(Debug, Error)]
pub enum Error {
    /// A field's type reference could not be resolved.
    #[error("field '{owner}.{field}': {source}")]
    Field {
        owner: String,
        field: String,
        #[source]
        source: ResolveError,
    },

    /// Two schema names in one scope map to the same Go identifier.
    #[error("'{owner}': '{first}' and '{second}' both become Go identifier '{ident}'")]
    NameCollision {
        owner: String,
        ident: String,
        first: String,
        second: String,
    },

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Deserialization failure, with the key path that failed.
    #[error("failed to parse '{path}' at {location}: {message}")]
    Parse {
        path: PathBuf,
        location: String,
        message: String,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown generator '{0}' (available: typegen)")]
    UnknownGenerator(String),

    /// `execute` was called before a successful `generate`.
    #[error("generator '{0}' has nothing to write; call generate before execute")]
    NotGenerated(&'static str),
}
