use crate::client::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecallError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Missing required sheets. Found: {}", .found.join(", "))]
    MissingSheets { found: Vec<String> },

    #[error("No spreadsheet connected. Run `recall connect <SPREADSHEET_ID>` first")]
    NotConnected,

    #[error("{kind} not found: {selector}")]
    RecordNotFound { kind: String, selector: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, RecallError>;
