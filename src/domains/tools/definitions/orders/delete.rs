//! Order deletion tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{Violations, gid, mutation_payload, payload_field};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation DeleteOrder($orderId: ID!) {
  orderDelete(orderId: $orderId) {
    deletedId
    userErrors { field message }
  }
}
"#;

/// Parameters for deleting an order.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOrderParams {
    /// Order id, numeric or `gid://shopify/Order/<id>`.
    pub order_id: String,
}

pub struct DeleteOrderTool;

#[async_trait]
impl ShopifyTool for DeleteOrderTool {
    const NAME: &'static str = "delete-order";
    const DESCRIPTION: &'static str = "Permanently delete an order. Only orders that are \
        archived or were created through the API can be deleted.";
    type Params = DeleteOrderParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new()
            .id("orderId", GidKind::Order, &params.order_id)
            .finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let id = gid("orderId", GidKind::Order, &params.order_id)?;
        let data = ctx
            .client
            .mutate(MUTATION, json!({ "orderId": id }))
            .await?;

        let payload = mutation_payload(data, "orderDelete")?;
        info!("Deleted order {}", id);
        Ok(payload_field(payload, "deletedId", "deletedOrderId"))
    }
}
