//! Tool-specific error types.

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::core::shopify::{ErrorKind, ShopifyError};

/// A single argument that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool or package entry does not exist.
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    /// Arguments failed schema or semantic validation.
    #[error("Invalid arguments: {}", format_violations(.0))]
    InvalidArguments(Vec<FieldViolation>),

    /// The addressed entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The remote call failed or reported user errors.
    #[error(transparent)]
    Shopify(#[from] ShopifyError),

    /// The tool execution failed.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

impl ToolError {
    /// Create a single-field "invalid arguments" error.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments(vec![FieldViolation::new(field, message)])
    }

    /// Create a new "not found" error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Short machine-readable category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::InvalidArguments(_) => "invalid_arguments",
            Self::NotFound(_) => "not_found",
            Self::Shopify(ShopifyError::UserErrors(_)) => "user_errors",
            Self::Shopify(e) => match e.kind() {
                ErrorKind::Authentication => "authentication",
                ErrorKind::Validation => "remote_validation",
                ErrorKind::Transient => "transient",
            },
            Self::ExecutionFailed(_) => "execution_failed",
        }
    }

    /// Structured context attached to a failed tool result.
    ///
    /// Contains variable key names and attempt counts, never argument values.
    pub fn metadata(&self, tool: &str) -> Value {
        let mut metadata = json!({
            "tool": tool,
            "errorKind": self.kind(),
        });

        match self {
            Self::InvalidArguments(violations) => {
                metadata["violations"] = json!(violations);
            }
            Self::Shopify(ShopifyError::UserErrors(errors)) => {
                metadata["userErrors"] = errors
                    .iter()
                    .map(|e| json!({ "field": e.field, "message": e.message }))
                    .collect();
            }
            Self::Shopify(ShopifyError::Rpc(rpc)) => {
                metadata["operation"] = json!(rpc.operation.to_string());
                metadata["attempts"] = json!(rpc.attempts);
                metadata["variableKeys"] = json!(rpc.variable_keys);
                metadata["document"] = json!(rpc.document);
                if let Some(status) = rpc.status {
                    metadata["httpStatus"] = json!(status);
                }
            }
            _ => {}
        }

        metadata
    }
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
