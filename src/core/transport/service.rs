//! Transport service - runs the MCP server until the client disconnects or
//! the process receives a shutdown signal.

use tracing::info;

use super::TransportResult;
use super::stdio::StdioTransport;
use crate::core::McpServer;

/// Transport service - manages the transport layer for the MCP server.
#[derive(Debug, Default)]
pub struct TransportService;

impl TransportService {
    /// Create a new transport service.
    pub fn new() -> Self {
        Self
    }

    /// Serve until stdin closes.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!("Starting transport: STDIO (standard MCP mode)");
        StdioTransport::run(server).await
    }

    /// Serve until stdin closes or a shutdown signal arrives.
    pub async fn run_until_shutdown(self, server: McpServer) -> TransportResult<()> {
        tokio::select! {
            result = self.run(server) => result,
            signal = shutdown_signal() => {
                signal?;
                info!("Shutdown signal received");
                Ok(())
            }
        }
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
