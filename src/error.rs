use thiserror::Error;

#[derive(Error, Debug)]
pub enum PacsaverError {
    #[error("{0}")]
    Usage(String),

    #[error("Backend init failed: {0}")]
    BackendInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PacsaverError>;
