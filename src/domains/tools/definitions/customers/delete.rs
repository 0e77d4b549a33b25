//! Customer deletion tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{Violations, gid, mutation_payload, payload_field};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation DeleteCustomer($input: CustomerDeleteInput!) {
  customerDelete(input: $input) {
    deletedCustomerId
    userErrors { field message }
  }
}
"#;

/// Parameters for deleting a customer.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCustomerParams {
    /// Customer id, numeric or `gid://shopify/Customer/<id>`.
    pub customer_id: String,
}

pub struct DeleteCustomerTool;

#[async_trait]
impl ShopifyTool for DeleteCustomerTool {
    const NAME: &'static str = "delete-customer";
    const DESCRIPTION: &'static str =
        "Delete a customer. Customers with existing orders cannot be deleted.";
    type Params = DeleteCustomerParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new()
            .id("customerId", GidKind::Customer, &params.customer_id)
            .finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let id = gid("customerId", GidKind::Customer, &params.customer_id)?;
        let data = ctx
            .client
            .mutate(MUTATION, json!({ "input": { "id": id } }))
            .await?;

        let payload = mutation_payload(data, "customerDelete")?;
        info!("Deleted customer {}", id);
        Ok(payload_field(payload, "deletedCustomerId", "deletedCustomerId"))
    }
}
