//! Product option deletion tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::PRODUCT_OPTIONS;
use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{
    Violations, document, gid, mutation_payload, payload_field,
};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation DeleteProductOptions(
  $productId: ID!
  $options: [ID!]!
  $strategy: ProductOptionDeleteStrategy
) {
  productOptionsDelete(productId: $productId, options: $options, strategy: $strategy) {
    deletedOptionsIds
    product { ...ProductOptions }
    userErrors { field message }
  }
}
"#;

/// How variants are handled when their option disappears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionDeleteStrategy {
    /// Only options with a single value may be deleted.
    Default,
    /// Delete options that no longer distinguish variants.
    NonDestructive,
    /// Keep the variant at the first position of each value combination.
    Position,
}

/// Parameters for deleting options.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductOptionsParams {
    /// Product id, numeric or `gid://shopify/Product/<id>`.
    pub product_id: String,

    /// Option ids to delete, numeric or GID.
    pub option_ids: Vec<String>,

    pub strategy: Option<OptionDeleteStrategy>,
}

pub struct DeleteProductOptionsTool;

#[async_trait]
impl ShopifyTool for DeleteProductOptionsTool {
    const NAME: &'static str = "delete-product-options";
    const DESCRIPTION: &'static str = "Delete options from a product. The strategy decides what \
        happens to variants that would become duplicates.";
    type Params = DeleteProductOptionsParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new()
            .id("productId", GidKind::Product, &params.product_id)
            .check(!params.option_ids.is_empty(), "optionIds", "at least one id is required")
            .ids("optionIds", GidKind::ProductOption, &params.option_ids)
            .finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let product_id = gid("productId", GidKind::Product, &params.product_id)?;
        let option_ids = params
            .option_ids
            .iter()
            .map(|id| gid("optionIds", GidKind::ProductOption, id))
            .collect::<Result<Vec<_>, _>>()?;

        let data = ctx
            .client
            .mutate(
                &document(MUTATION, &[PRODUCT_OPTIONS]),
                json!({ "productId": product_id, "options": option_ids, "strategy": params.strategy }),
            )
            .await?;

        let payload = mutation_payload(data, "productOptionsDelete")?;
        let mut out = payload_field(payload.clone(), "deletedOptionsIds", "deletedOptionIds");
        out.extend(payload_field(payload, "product", "product"));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::run_tool;
    use crate::domains::tools::test_support::{args, context_for, mock_graphql};
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_deleted_ids_returned() {
        let server = MockServer::start().await;
        mock_graphql(
            &server,
            "DeleteProductOptions",
            json!({ "productOptionsDelete": {
                "deletedOptionsIds": ["gid://shopify/ProductOption/90"],
                "product": { "id": "gid://shopify/Product/9", "options": [] },
                "userErrors": []
            }}),
        )
        .await;

        let output = run_tool::<DeleteProductOptionsTool>(
            args(json!({ "productId": "9", "optionIds": ["90"], "strategy": "NON_DESTRUCTIVE" })),
            &context_for(&server),
        )
        .await;
        assert!(output.success);
        assert_eq!(output.data["deletedOptionIds"], json!(["gid://shopify/ProductOption/90"]));
    }

    #[tokio::test]
    async fn test_option_in_use_is_user_error() {
        let server = MockServer::start().await;
        mock_graphql(
            &server,
            "DeleteProductOptions",
            json!({ "productOptionsDelete": {
                "deletedOptionsIds": null,
                "product": null,
                "userErrors": [{ "field": ["options"], "message": "Option has multiple values" }]
            }}),
        )
        .await;

        let output = run_tool::<DeleteProductOptionsTool>(
            args(json!({ "productId": "9", "optionIds": ["90"] })),
            &context_for(&server),
        )
        .await;
        assert!(!output.success);
        assert_eq!(output.metadata.unwrap()["errorKind"], "user_errors");
    }
}
