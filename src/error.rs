//! Error types for schemamap.
//!
//! Descriptor construction and rendering never fail; errors only come from
//! the edges of the system (reading schemas and config files, looking up
//! operations by name).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaMapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse schema: {0}")]
    SchemaParse(String),

    #[error("Invalid config {0}: {1}")]
    Config(PathBuf, String),

    #[error("Unknown root operation: {0}")]
    UnknownOperation(String),
}

pub type Result<T> = std::result::Result<T, SchemaMapError>;
