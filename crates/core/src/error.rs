//! Workspace-level error types

use thiserror::Error;

/// Top-level error type
///
/// The decision core itself has no mid-request failure modes; errors
/// surface only at construction time (config files, corpus loading).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),
}

/// Result alias using the workspace error type
pub type Result<T> = std::result::Result<T, Error>;
