//! Error types for the keeper service

use surge_core::SurgeCoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeeperError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Oracle error: {0}")]
    OracleError(String),

    #[error("Core error: {0}")]
    CoreError(#[from] SurgeCoreError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type KeeperResult<T> = Result<T, KeeperError>;
