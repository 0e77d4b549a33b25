//! Customer listing tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::CUSTOMER_SUMMARY;
use crate::domains::tools::definitions::common::{Violations, default_limit, document, page_data};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const QUERY: &str = r#"
query GetCustomers($first: Int!, $after: String, $query: String) {
  customers(first: $first, after: $after, query: $query, sortKey: UPDATED_AT, reverse: true) {
    edges { node { ...CustomerSummary } }
    pageInfo { hasNextPage endCursor }
  }
}
"#;

/// Parameters for listing customers.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCustomersParams {
    /// Maximum number of customers to return (default: 10, max: 250).
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Cursor from a previous page's `pageInfo.endCursor`.
    pub after: Option<String>,

    /// Search query, e.g. `email:ada@example.com` or `tag:vip`.
    pub query: Option<String>,
}

pub struct GetCustomersTool;

#[async_trait]
impl ShopifyTool for GetCustomersTool {
    const NAME: &'static str = "get-customers";
    const DESCRIPTION: &'static str = "List customers with optional search query. Returns name, \
        email, phone, tags, order count and amount spent for each customer.";
    type Params = GetCustomersParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new().limit(params.limit).finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let query = params
            .query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        let data = ctx
            .client
            .query(
                &document(QUERY, &[CUSTOMER_SUMMARY]),
                json!({ "first": params.limit, "after": params.after, "query": query }),
            )
            .await?;

        page_data(data, "customers", "customers")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::run_tool;
    use crate::domains::tools::test_support::{args, context_for, mock_graphql, received_body};
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_lists_customers_with_cursor() {
        let server = MockServer::start().await;
        mock_graphql(
            &server,
            "GetCustomers",
            json!({ "customers": {
                "edges": [{ "node": { "id": "gid://shopify/Customer/1", "email": "ada@example.com" } }],
                "pageInfo": { "hasNextPage": false, "endCursor": null }
            }}),
        )
        .await;

        let output = run_tool::<GetCustomersTool>(
            args(json!({ "query": " tag:vip ", "after": "abc" })),
            &context_for(&server),
        )
        .await;
        assert!(output.success);
        assert_eq!(output.data["customers"][0]["email"], "ada@example.com");

        let vars = received_body(&server).await["variables"].clone();
        assert_eq!(vars["query"], "tag:vip");
        assert_eq!(vars["after"], "abc");
    }
}
