//! Shopify MCP Server Library
//!
//! A Model Context Protocol (MCP) server that lets an agent host manage a
//! Shopify store through the Admin GraphQL API.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the Shopify client and token
//!   provider, the MCP server handler and the stdio transport
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the Shopify tools, their registry and tool packages
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use shopify_mcp_server::core::shopify::{ShopifyClient, TokenProvider};
//! use shopify_mcp_server::core::{Config, McpServer};
//! use shopify_mcp_server::domains::tools::{ToolContext, ToolPackageRegistry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(Config::load()?);
//!     let provider = TokenProvider::from_config(&config.shopify)?;
//!     provider.initialize().await?;
//!
//!     let client = ShopifyClient::from_config(&config.shopify, provider.subscribe())?;
//!     let tools = ToolPackageRegistry::from_config(&config).get_active_tools()?;
//!     let server = McpServer::new(ToolContext::new(config, client), &tools);
//!     // Start the transport...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
