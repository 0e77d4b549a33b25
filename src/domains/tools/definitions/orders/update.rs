//! Order update tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::{ORDER_DETAIL, ORDER_SUMMARY};
use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{
    Violations, document, gid, mutation_payload, payload_field,
};
use crate::domains::tools::definitions::customers::AddressInput;
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation UpdateOrder($input: OrderInput!) {
  orderUpdate(input: $input) {
    order { ...OrderDetail }
    userErrors { field message }
  }
}
"#;

/// Parameters for updating an order's editable attributes.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderParams {
    /// Order id, numeric or `gid://shopify/Order/<id>`.
    pub order_id: String,

    pub email: Option<String>,

    pub note: Option<String>,

    /// Replaces all tags on the order.
    pub tags: Option<Vec<String>>,

    pub shipping_address: Option<AddressInput>,

    /// Purchase order number.
    pub po_number: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderInput<'a> {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_address: Option<&'a AddressInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    po_number: Option<&'a str>,
}

impl UpdateOrderParams {
    fn has_changes(&self) -> bool {
        self.email.is_some()
            || self.note.is_some()
            || self.tags.is_some()
            || self.shipping_address.is_some()
            || self.po_number.is_some()
    }
}

pub struct UpdateOrderTool;

#[async_trait]
impl ShopifyTool for UpdateOrderTool {
    const NAME: &'static str = "update-order";
    const DESCRIPTION: &'static str = "Update an order's email, note, tags, shipping address or \
        PO number. Line items and totals cannot be changed here.";
    type Params = UpdateOrderParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new()
            .id("orderId", GidKind::Order, &params.order_id)
            .check(params.has_changes(), "order", "at least one field to update is required")
            .finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let id = gid("orderId", GidKind::Order, &params.order_id)?;
        let input = OrderInput {
            id: id.clone(),
            email: params.email.as_deref(),
            note: params.note.as_deref(),
            tags: params.tags.as_deref(),
            shipping_address: params.shipping_address.as_ref(),
            po_number: params.po_number.as_deref(),
        };

        let data = ctx
            .client
            .mutate(
                &document(MUTATION, &[ORDER_DETAIL, ORDER_SUMMARY]),
                json!({ "input": input }),
            )
            .await?;

        let payload = mutation_payload(data, "orderUpdate")?;
        info!("Updated order {}", id);
        Ok(payload_field(payload, "order", "order"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::run_tool;
    use crate::domains::tools::test_support::{
        args, context_for, mock_graphql, offline_context, received_body,
    };
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_only_given_fields_sent() {
        let server = MockServer::start().await;
        mock_graphql(
            &server,
            "UpdateOrder",
            json!({ "orderUpdate": { "order": { "id": "gid://shopify/Order/7", "note": "gift" }, "userErrors": [] } }),
        )
        .await;

        let output = run_tool::<UpdateOrderTool>(
            args(json!({ "orderId": "7", "note": "gift", "tags": ["vip"] })),
            &context_for(&server),
        )
        .await;
        assert!(output.success);
        assert_eq!(output.data["order"]["note"], "gift");

        let body = received_body(&server).await;
        assert_eq!(
            body["variables"]["input"],
            json!({ "id": "gid://shopify/Order/7", "note": "gift", "tags": ["vip"] })
        );
    }

    #[tokio::test]
    async fn test_no_changes_rejected() {
        let output =
            run_tool::<UpdateOrderTool>(args(json!({ "orderId": "7" })), &offline_context()).await;
        assert!(!output.success);
        assert_eq!(output.metadata.unwrap()["violations"][0]["field"], "order");
    }
}
