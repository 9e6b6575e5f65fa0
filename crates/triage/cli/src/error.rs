//! CLI error types

use thiserror::Error;
use triage_core::TriageError;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Triage error: {0}")]
    Triage(#[from] TriageError),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
