use blueprint_api::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
