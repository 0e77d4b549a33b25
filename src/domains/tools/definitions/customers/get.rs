//! Single customer lookup tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::{CUSTOMER_DETAIL, CUSTOMER_SUMMARY};
use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{Violations, document, entity_data, gid};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const QUERY: &str = r#"
query GetCustomerById($id: ID!) {
  customer(id: $id) { ...CustomerDetail }
}
"#;

/// Parameters for fetching one customer.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCustomerByIdParams {
    /// Customer id, numeric or `gid://shopify/Customer/<id>`.
    pub customer_id: String,
}

pub struct GetCustomerByIdTool;

#[async_trait]
impl ShopifyTool for GetCustomerByIdTool {
    const NAME: &'static str = "get-customer-by-id";
    const DESCRIPTION: &'static str = "Get a customer by id, including note, marketing consent, \
        default address and saved addresses.";
    type Params = GetCustomerByIdParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new()
            .id("customerId", GidKind::Customer, &params.customer_id)
            .finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let id = gid("customerId", GidKind::Customer, &params.customer_id)?;
        let data = ctx
            .client
            .query(
                &document(QUERY, &[CUSTOMER_DETAIL, CUSTOMER_SUMMARY]),
                json!({ "id": id }),
            )
            .await?;

        entity_data(data, "customer", "customer", &id)
    }
}
