use crate::schema::SchemaError;
use thiserror::Error;

/// Stage failures inside the recipe parser.
///
/// These never reach callers of the parser: they are logged and turned into an
/// empty result.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The merged envelope could not hold a recipe list
    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(String),

    /// The envelope failed schema validation
    #[error("Schema violation: {0}")]
    Schema(#[from] SchemaError),

    /// JSON (de)serialization failed at the serde level
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
