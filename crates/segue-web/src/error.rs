//! Error types for configuration and serving.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// An error propagated from the lookup engine.
    #[error(transparent)]
    Core(#[from] segue_core::Error),
}

pub type WebResult<T> = std::result::Result<T, WebError>;
