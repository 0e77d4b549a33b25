//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, secret redaction, the Shopify
//! Admin API client, server lifecycle management and the transport layer.

pub mod config;
pub mod error;
pub mod security;
pub mod server;
pub mod shopify;
pub mod transport;

pub use config::{Cli, Config, Credential, ShopifyConfig};
pub use error::{Error, Result};
pub use security::{mask_secret, redact_json};
pub use server::McpServer;
pub use transport::TransportService;
