use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpeditionError {
    #[error("Unknown task data: {0}")]
    UnknownTaskData(String),

    #[error("Duplicate task data id: {0}")]
    DuplicateTaskData(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExpeditionError>;
