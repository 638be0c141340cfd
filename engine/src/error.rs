use cutlist_shared::models::{DefinitionId, InstanceId};
use thiserror::Error;

/// Failures reported by a host model implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("Unknown definition: {0}")]
    UnknownDefinition(DefinitionId),

    #[error("Unknown instance: {0}")]
    UnknownInstance(InstanceId),

    #[error("Host rejected the operation: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum CutlistError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV writing error: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Host model error: {source}")]
    HostModelError {
        #[from]
        source: HostError,
    },
}
