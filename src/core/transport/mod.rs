//! Transport layer for the MCP server.
//!
//! The agent host talks to the server over standard input/output; each
//! message is delegated to the MCP server handler.

mod error;
mod service;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use service::TransportService;
