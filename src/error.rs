use thiserror::Error;

#[derive(Error, Debug)]
pub enum NBackError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Scheduler Error: {0}")]
    Scheduler(String),
}

pub type NbResult<T> = Result<T, NBackError>;
