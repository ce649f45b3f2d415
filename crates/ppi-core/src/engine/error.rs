use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Chain '{chain_id}' not found in structure")]
    ChainNotFound { chain_id: char },

    #[error("Cannot compute {context}: the atom set is empty")]
    EmptySet { context: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
