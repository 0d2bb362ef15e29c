use thiserror::Error;

use meridian_core::error::CoreError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("malformed response set: {0}")]
    MalformedInput(#[from] CoreError),

    #[error("enrichment provider '{provider}' failed: {message}")]
    Enrichment { provider: String, message: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
