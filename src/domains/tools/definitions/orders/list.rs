//! Order listing tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::ORDER_SUMMARY;
use crate::domains::tools::definitions::common::{Violations, default_limit, document, page_data};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const QUERY: &str = r#"
query GetOrders($first: Int!, $after: String, $query: String) {
  orders(first: $first, after: $after, query: $query, sortKey: CREATED_AT, reverse: true) {
    edges { node { ...OrderSummary } }
    pageInfo { hasNextPage endCursor }
  }
}
"#;

/// Order status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusFilter {
    #[default]
    Any,
    Open,
    Closed,
    Cancelled,
}

impl OrderStatusFilter {
    fn search_term(self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Open => Some("status:open"),
            Self::Closed => Some("status:closed"),
            Self::Cancelled => Some("status:cancelled"),
        }
    }
}

/// Parameters for listing orders.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetOrdersParams {
    /// Maximum number of orders to return (default: 10, max: 250).
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Cursor from a previous page's `pageInfo.endCursor`.
    pub after: Option<String>,

    /// Order status (default: any).
    #[serde(default)]
    pub status: OrderStatusFilter,

    /// Additional search query, e.g. `financial_status:paid`.
    pub query: Option<String>,
}

pub struct GetOrdersTool;

#[async_trait]
impl ShopifyTool for GetOrdersTool {
    const NAME: &'static str = "get-orders";
    const DESCRIPTION: &'static str = "List orders, newest first, optionally filtered by status \
        (any, open, closed, cancelled) and a search query.";
    type Params = GetOrdersParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new().limit(params.limit).finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let status: Option<&str> = params.status.search_term();
        let terms: Vec<&str> = status
            .into_iter()
            .chain(params.query.as_deref().map(str::trim).filter(|q| !q.is_empty()))
            .collect();
        let query = (!terms.is_empty()).then(|| terms.join(" "));

        let data = ctx
            .client
            .query(
                &document(QUERY, &[ORDER_SUMMARY]),
                json!({ "first": params.limit, "after": params.after, "query": query }),
            )
            .await?;

        page_data(data, "orders", "orders")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::run_tool;
    use crate::domains::tools::test_support::{
        args, context_for, mock_graphql, offline_context, received_body,
    };
    use serde_json::Value;
    use wiremock::MockServer;

    async fn empty_orders(server: &MockServer) {
        mock_graphql(
            server,
            "GetOrders",
            json!({ "orders": { "edges": [], "pageInfo": { "hasNextPage": false, "endCursor": null } } }),
        )
        .await;
    }

    #[tokio::test]
    async fn test_status_and_query_combined() {
        let server = MockServer::start().await;
        empty_orders(&server).await;

        let output = run_tool::<GetOrdersTool>(
            args(json!({ "status": "open", "query": "financial_status:paid" })),
            &context_for(&server),
        )
        .await;
        assert!(output.success);
        assert_eq!(output.data["orders"], json!([]));

        let body = received_body(&server).await;
        assert_eq!(body["variables"]["query"], "status:open financial_status:paid");
    }

    #[tokio::test]
    async fn test_any_status_sends_no_query() {
        let server = MockServer::start().await;
        empty_orders(&server).await;

        run_tool::<GetOrdersTool>(args(json!({})), &context_for(&server)).await;
        let body = received_body(&server).await;
        assert_eq!(body["variables"]["query"], Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_status_rejected() {
        let output =
            run_tool::<GetOrdersTool>(args(json!({ "status": "shipped" })), &offline_context()).await;
        assert!(!output.success);
    }
}
