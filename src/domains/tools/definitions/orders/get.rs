//! Single order lookup tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::{ORDER_DETAIL, ORDER_SUMMARY};
use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{Violations, document, entity_data, gid};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const QUERY: &str = r#"
query GetOrderById($id: ID!) {
  order(id: $id) { ...OrderDetail }
}
"#;

/// Parameters for fetching one order.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetOrderByIdParams {
    /// Order id, numeric or `gid://shopify/Order/<id>`.
    pub order_id: String,
}

pub struct GetOrderByIdTool;

#[async_trait]
impl ShopifyTool for GetOrderByIdTool {
    const NAME: &'static str = "get-order-by-id";
    const DESCRIPTION: &'static str = "Get an order by id with line items, price breakdown, \
        shipping address and customer.";
    type Params = GetOrderByIdParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new()
            .id("orderId", GidKind::Order, &params.order_id)
            .finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let id = gid("orderId", GidKind::Order, &params.order_id)?;
        let data = ctx
            .client
            .query(&document(QUERY, &[ORDER_DETAIL, ORDER_SUMMARY]), json!({ "id": id }))
            .await?;

        entity_data(data, "order", "order", &id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::run_tool;
    use crate::domains::tools::test_support::{args, context_for, mock_graphql};
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_line_items_flattened() {
        let server = MockServer::start().await;
        mock_graphql(
            &server,
            "GetOrderById",
            json!({ "order": {
                "id": "gid://shopify/Order/999",
                "name": "#1001",
                "lineItems": { "edges": [
                    { "node": { "title": "Tee", "quantity": 2 } },
                    { "node": { "title": "Mug", "quantity": 1 } }
                ]}
            }}),
        )
        .await;

        let output =
            run_tool::<GetOrderByIdTool>(args(json!({ "orderId": "999" })), &context_for(&server)).await;
        assert!(output.success);
        assert_eq!(output.data["order"]["lineItems"][1]["title"], "Mug");
    }
}
