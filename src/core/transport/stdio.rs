//! STDIO transport implementation.
//!
//! Stdout carries protocol messages only; logs go to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve one MCP session until the client closes stdin.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let tools = server.active_tools().len();
        info!("Ready - serving {} tools on stdin/stdout", tools);

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::handshake(e.to_string()))?;

        if let Some(peer) = service.peer_info() {
            info!(
                "Client connected: {} {}",
                peer.client_info.name, peer.client_info.version
            );
        }

        let reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::session(e.to_string()))?;

        info!(?reason, "Client session ended");
        Ok(())
    }
}
