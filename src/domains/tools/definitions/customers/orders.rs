//! Orders of one customer.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::core::shopify::{GidKind, from_gid};
use crate::domains::tools::definitions::common::{
    Violations, default_limit, document, gid, page_data,
};
use crate::domains::tools::definitions::orders::ORDER_SUMMARY;
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const QUERY: &str = r#"
query GetCustomerOrders($first: Int!, $after: String, $query: String!) {
  orders(first: $first, after: $after, query: $query, sortKey: CREATED_AT, reverse: true) {
    edges { node { ...OrderSummary } }
    pageInfo { hasNextPage endCursor }
  }
}
"#;

/// Parameters for listing a customer's orders.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCustomerOrdersParams {
    /// Customer id, numeric or `gid://shopify/Customer/<id>`.
    pub customer_id: String,

    /// Maximum number of orders to return (default: 10, max: 250).
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Cursor from a previous page's `pageInfo.endCursor`.
    pub after: Option<String>,
}

pub struct GetCustomerOrdersTool;

#[async_trait]
impl ShopifyTool for GetCustomerOrdersTool {
    const NAME: &'static str = "get-customer-orders";
    const DESCRIPTION: &'static str = "List the orders placed by a customer, newest first, with \
        totals and financial/fulfillment status.";
    type Params = GetCustomerOrdersParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new()
            .id("customerId", GidKind::Customer, &params.customer_id)
            .limit(params.limit)
            .finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let customer_gid = gid("customerId", GidKind::Customer, &params.customer_id)?;
        let search = format!("customer_id:{}", from_gid(&customer_gid));

        let data = ctx
            .client
            .query(
                &document(QUERY, &[ORDER_SUMMARY]),
                json!({ "first": params.limit, "after": params.after, "query": search }),
            )
            .await?;

        let mut out = ToolData::new();
        out.insert("customerId".to_string(), json!(customer_gid));
        out.extend(page_data(data, "orders", "orders")?);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::run_tool;
    use crate::domains::tools::test_support::{args, context_for, mock_graphql, received_body};
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_filters_by_bare_customer_id() {
        let server = MockServer::start().await;
        mock_graphql(
            &server,
            "GetCustomerOrders",
            json!({ "orders": {
                "edges": [{ "node": { "id": "gid://shopify/Order/999", "name": "#1001" } }],
                "pageInfo": { "hasNextPage": false, "endCursor": "c1" }
            }}),
        )
        .await;

        let output = run_tool::<GetCustomerOrdersTool>(
            args(json!({ "customerId": "gid://shopify/Customer/42" })),
            &context_for(&server),
        )
        .await;
        assert!(output.success);
        assert_eq!(output.data["orders"][0]["name"], "#1001");
        assert_eq!(output.data["customerId"], "gid://shopify/Customer/42");

        let body = received_body(&server).await;
        assert_eq!(body["variables"]["query"], "customer_id:42");
    }
}
