//! Error types for the Shopify client and token provider.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Maximum number of characters of a GraphQL document kept in diagnostics.
const DOCUMENT_PREVIEW_CHARS: usize = 200;

/// Coarse classification of a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The remote rejected the credential (401/403).
    Authentication,
    /// The remote rejected the request itself (any other 4xx, 429 included).
    Validation,
    /// Server-side or network failure worth retrying.
    Transient,
}

impl ErrorKind {
    /// Whether a read operation may be retried after this failure.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Transient)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Validation => "validation",
            Self::Transient => "transient",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GraphQL operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Query,
    Mutation,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => f.write_str("query"),
            Self::Mutation => f.write_str("mutation"),
        }
    }
}

/// A classified failure of a GraphQL call.
///
/// Carries only variable key names, never their values.
#[derive(Debug, Clone)]
pub struct RpcError {
    pub kind: ErrorKind,
    pub operation: Operation,
    /// Document text, truncated.
    pub document: String,
    pub variable_keys: Vec<String>,
    /// Message of the last underlying failure.
    pub message: String,
    pub attempts: u32,
    /// HTTP status of the last attempt, if a response was received.
    pub status: Option<u16>,
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed after {} attempt(s) ({}): {}",
            self.operation, self.attempts, self.kind, self.message
        )
    }
}

impl std::error::Error for RpcError {}

/// A user error reported inside a mutation payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserError {
    /// Path of the offending input field, if any.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field.as_deref() {
            Some(field) if !field.is_empty() => write!(f, "{}: {}", field.join("."), self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// Errors that can occur when talking to the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// The OAuth token endpoint rejected the client credentials.
    #[error("Authentication failed (HTTP {status}): {body}")]
    Authentication { status: u16, body: String },

    /// The token endpoint could not be reached or answered garbage.
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// The token provider was used before `initialize()`.
    #[error("Token provider not initialized; call initialize() first")]
    NotInitialized,

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// A classified GraphQL call failure.
    #[error("{0}")]
    Rpc(Box<RpcError>),

    /// The remote accepted the request but reported user errors.
    #[error("{}", format_user_errors(.0))]
    UserErrors(Vec<UserError>),

    /// The response did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ShopifyError {
    /// Coarse kind of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Rpc(rpc) => rpc.kind,
            Self::UserErrors(_) => ErrorKind::Validation,
            Self::TokenExchange(_)
            | Self::NotInitialized
            | Self::Http(_)
            | Self::Decode(_) => ErrorKind::Transient,
        }
    }

    /// The RPC diagnostics, when this is a classified call failure.
    pub fn rpc(&self) -> Option<&RpcError> {
        match self {
            Self::Rpc(rpc) => Some(rpc),
            _ => None,
        }
    }
}

impl From<RpcError> for ShopifyError {
    fn from(err: RpcError) -> Self {
        Self::Rpc(Box::new(err))
    }
}

fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Shorten a GraphQL document for diagnostics.
pub fn truncate_document(document: &str) -> String {
    let compact = document.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.chars().count() <= DOCUMENT_PREVIEW_CHARS {
        return compact;
    }
    let head: String = compact.chars().take(DOCUMENT_PREVIEW_CHARS).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transient_is_retryable() {
        assert!(ErrorKind::Transient.is_retryable());
        assert!(!ErrorKind::Validation.is_retryable());
        assert!(!ErrorKind::Authentication.is_retryable());
    }

    #[test]
    fn test_user_errors_display_is_field_qualified() {
        let err = ShopifyError::UserErrors(vec![
            UserError {
                field: Some(vec!["input".to_string(), "email".to_string()]),
                message: "Email is invalid".to_string(),
            },
            UserError {
                field: None,
                message: "Something else".to_string(),
            },
        ]);
        assert_eq!(err.to_string(), "input.email: Email is invalid; Something else");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_truncate_document() {
        let short = "query {\n  shop { name }\n}";
        assert_eq!(truncate_document(short), "query { shop { name } }");

        let long = format!("query {{ {} }}", "field ".repeat(100));
        let truncated = truncate_document(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }

    #[test]
    fn test_rpc_error_display() {
        let err = RpcError {
            kind: ErrorKind::Transient,
            operation: Operation::Query,
            document: "query { shop { name } }".to_string(),
            variable_keys: vec![],
            message: "HTTP 503".to_string(),
            attempts: 4,
            status: Some(503),
        };
        assert_eq!(
            err.to_string(),
            "query failed after 4 attempt(s) (transient): HTTP 503"
        );
    }
}
