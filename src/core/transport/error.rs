//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors raised while serving the MCP session.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The shutdown signal listener could not be installed.
    #[error("Failed to listen for shutdown signals: {0}")]
    Signal(#[from] std::io::Error),

    /// The client never completed the MCP initialize exchange.
    #[error("MCP handshake failed: {0}")]
    Handshake(String),

    /// The session ended abnormally.
    #[error("MCP session error: {0}")]
    Session(String),
}

impl TransportError {
    pub fn handshake(msg: impl Into<String>) -> Self {
        Self::Handshake(msg.into())
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }
}
