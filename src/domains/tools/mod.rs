//! Tools domain module.
//!
//! Tools are the operations MCP clients call against the Shopify store.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - The [`ShopifyTool`] trait and the tool-call boundary
//! - `registry.rs` - [`ToolId`], the closed set of known tools
//! - `packages.rs` - Named tool subsets selected at startup
//! - `router.rs` - ToolRouter builder for the active package
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/<entity>/` implementing `ShopifyTool`
//! 2. Export it from `definitions/mod.rs`
//! 3. Add a `ToolId` variant; the compiler then points at every match
//!    (`registry.rs`, `router.rs`) that needs the new arm
//! 4. Add it to the relevant built-in packages in `packages.rs`

pub mod definitions;
mod error;
mod handlers;
pub mod packages;
mod registry;
pub mod router;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{FieldViolation, ToolError};
pub use handlers::*;
pub use packages::{ToolPackage, ToolPackageRegistry};
pub use registry::{ToolId, ToolRegistry, tool_metadata};
pub use router::build_tool_router;
