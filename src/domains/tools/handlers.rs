//! Tool handlers module.
//!
//! Every Shopify tool implements [`ShopifyTool`]: a parameter type that
//! derives its JSON schema, an explicit validation step and an async
//! execution against the shared [`ToolContext`]. [`run_tool`] is the tool
//! boundary: whatever happens inside, the caller gets a [`ToolOutput`].

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::{CallToolResult, Content, JsonObject};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::{info, instrument, warn};

use super::error::{FieldViolation, ToolError};
use crate::core::config::Config;
use crate::core::security::redact_json;
use crate::core::shopify::ShopifyClient;

/// Result payload of a successful tool call.
pub type ToolData = Map<String, Value>;

/// Shared execution context bound to every tool instance.
#[derive(Clone)]
pub struct ToolContext {
    pub config: Arc<Config>,
    pub client: ShopifyClient,
}

impl ToolContext {
    pub fn new(config: Arc<Config>, client: ShopifyClient) -> Self {
        Self { config, client }
    }
}

/// Output from a tool execution.
///
/// Serialized as `{"success": true, ...data}` or
/// `{"success": false, "error": ..., "metadata": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutput {
    /// Whether the execution was successful.
    pub success: bool,

    /// The result data from the tool.
    #[serde(flatten)]
    pub data: ToolData,

    /// Error message if execution failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Structured failure context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ToolOutput {
    /// Create a successful tool output.
    pub fn success(data: ToolData) -> Self {
        Self {
            success: true,
            data,
            error: None,
            metadata: None,
        }
    }

    /// Create a failed tool output.
    pub fn failure(error: impl Into<String>, metadata: Value) -> Self {
        Self {
            success: false,
            data: Map::new(),
            error: Some(error.into()),
            metadata: Some(metadata),
        }
    }

    /// Serialize into the JSON text block returned to the agent host.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            json!({ "success": false, "error": format!("Failed to serialize result: {e}") })
                .to_string()
        })
    }

    /// Wrap into an MCP tool result; failures set `is_error`.
    pub fn into_call_result(self) -> CallToolResult {
        let content = vec![Content::text(self.to_json_string())];
        if self.success {
            CallToolResult::success(content)
        } else {
            CallToolResult::error(content)
        }
    }
}

/// A tool backed by the Shopify Admin API.
#[async_trait::async_trait]
pub trait ShopifyTool: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Arguments, deserialized straight from the call's argument object.
    type Params: DeserializeOwned + JsonSchema + Send + Sync + 'static;

    /// Semantic checks beyond what deserialization enforces.
    fn validate(_params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Ok(())
    }

    /// Build the GraphQL operation, run it and reshape the response.
    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError>;
}

/// Parse, validate and execute a tool call, converting every failure
/// (including a panic inside the tool) into a structured result.
#[instrument(skip_all, fields(tool = T::NAME))]
pub async fn run_tool<T: ShopifyTool>(arguments: JsonObject, ctx: &ToolContext) -> ToolOutput {
    let call = async {
        let params: T::Params = serde_json::from_value(Value::Object(arguments))
            .map_err(|e| ToolError::invalid_field("arguments", e.to_string()))?;
        T::validate(&params).map_err(ToolError::InvalidArguments)?;
        T::execute(params, ctx).await
    };

    let result = match AssertUnwindSafe(call).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => Err(ToolError::execution_failed(panic_message(panic.as_ref()))),
    };

    match result {
        Ok(data) => {
            info!("Tool {} completed", T::NAME);
            ToolOutput::success(data)
        }
        Err(e) => {
            let metadata = e.metadata(T::NAME);
            warn!(metadata = %redact_json(&metadata), "Tool {} failed: {}", T::NAME, e);
            ToolOutput::failure(e.to_string(), metadata)
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("tool panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("tool panicked: {s}")
    } else {
        "tool panicked".to_string()
    }
}
