//! Customer update tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{CUSTOMER_DETAIL, CUSTOMER_SUMMARY, CustomerFields};
use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{
    Violations, document, gid, mutation_payload, payload_field,
};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation UpdateCustomer($input: CustomerInput!) {
  customerUpdate(input: $input) {
    customer { ...CustomerDetail }
    userErrors { field message }
  }
}
"#;

/// Parameters for updating a customer. Omitted fields are left unchanged.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerParams {
    /// Customer id, numeric or `gid://shopify/Customer/<id>`.
    pub customer_id: String,

    #[serde(flatten)]
    pub fields: CustomerFields,
}

pub struct UpdateCustomerTool;

#[async_trait]
impl ShopifyTool for UpdateCustomerTool {
    const NAME: &'static str = "update-customer";
    const DESCRIPTION: &'static str = "Update a customer's email, phone, name, note, tags, tax \
        exemption or addresses. Only the provided fields are changed.";
    type Params = UpdateCustomerParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        let mut v = Violations::new();
        v.id("customerId", GidKind::Customer, &params.customer_id);
        v.check(!params.fields.is_empty(), "customer", "at least one field to update is required");
        params.fields.check(&mut v);
        v.finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let id = gid("customerId", GidKind::Customer, &params.customer_id)?;
        let mut input = serde_json::to_value(&params.fields)
            .map_err(|e| ToolError::execution_failed(format!("cannot encode customer input: {e}")))?;
        if let Value::Object(map) = &mut input {
            map.insert("id".to_string(), json!(id));
        }

        let data = ctx
            .client
            .mutate(
                &document(MUTATION, &[CUSTOMER_DETAIL, CUSTOMER_SUMMARY]),
                json!({ "input": input }),
            )
            .await?;

        let payload = mutation_payload(data, "customerUpdate")?;
        Ok(payload_field(payload, "customer", "customer"))
    }
}
