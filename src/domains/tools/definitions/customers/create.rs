//! Customer creation tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::{CUSTOMER_DETAIL, CUSTOMER_SUMMARY, CustomerFields};
use crate::domains::tools::definitions::common::{
    Violations, document, mutation_payload, payload_field,
};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation CreateCustomer($input: CustomerInput!) {
  customerCreate(input: $input) {
    customer { ...CustomerDetail }
    userErrors { field message }
  }
}
"#;

/// Parameters for creating a customer. An email or a phone is required.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateCustomerParams {
    #[serde(flatten)]
    pub fields: CustomerFields,
}

pub struct CreateCustomerTool;

#[async_trait]
impl ShopifyTool for CreateCustomerTool {
    const NAME: &'static str = "create-customer";
    const DESCRIPTION: &'static str = "Create a customer with email and/or phone, name, note, \
        tags, tax exemption and addresses.";
    type Params = CreateCustomerParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        let fields = &params.fields;
        let mut v = Violations::new();
        v.check(
            fields.email.is_some() || fields.phone.is_some(),
            "email",
            "an email or a phone number is required",
        );
        fields.check(&mut v);
        v.finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let data = ctx
            .client
            .mutate(
                &document(MUTATION, &[CUSTOMER_DETAIL, CUSTOMER_SUMMARY]),
                json!({ "input": params.fields }),
            )
            .await?;

        let payload = mutation_payload(data, "customerCreate")?;
        Ok(payload_field(payload, "customer", "customer"))
    }
}
