//! MCP Server implementation.
//!
//! The handler only exposes tools. The set of routes is fixed when the
//! server is built from the active tool package and never changes while
//! the process runs.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! The ToolRouter is built in `domains/tools/router.rs` from a list of
//! [`ToolId`]s, so adding a tool does not touch this file.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use crate::domains::tools::{ToolContext, ToolId, build_tool_router};

const INSTRUCTIONS: &str = "Tools for managing a Shopify store through the Admin API: \
    products, variants, options, customers and orders. Ids may be passed as bare numbers \
    or as gid://shopify/<Type>/<id>. List tools are paginated: pass pageInfo.endCursor \
    back as `after` to fetch the next page.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tools exposed by this instance, in package order.
    active_tools: Arc<[ToolId]>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server exposing `tools`, all bound to `ctx`.
    pub fn new(ctx: ToolContext, tools: &[ToolId]) -> Self {
        Self {
            config: ctx.config.clone(),
            active_tools: tools.into(),
            tool_router: build_tool_router::<Self>(&ctx, tools),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn active_tools(&self) -> &[ToolId] {
        &self.active_tools
    }

    /// Tool metadata as listed to clients.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}
