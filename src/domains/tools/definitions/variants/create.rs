//! Bulk variant creation tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{MAX_VARIANTS_PER_CALL, VARIANT_FIELDS, VariantFields};
use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{
    Violations, document, gid, mutation_payload, payload_field,
};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation CreateProductVariants(
  $productId: ID!
  $variants: [ProductVariantsBulkInput!]!
  $strategy: ProductVariantsBulkCreateStrategy
) {
  productVariantsBulkCreate(productId: $productId, variants: $variants, strategy: $strategy) {
    productVariants { ...VariantFields }
    userErrors { field message }
  }
}
"#;

/// What happens to the placeholder variant of a product without options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantCreateStrategy {
    /// Keep the existing standalone variant.
    Default,
    /// Replace the standalone variant with the new ones.
    RemoveStandaloneVariant,
}

/// Parameters for creating variants.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductVariantsParams {
    /// Product id, numeric or `gid://shopify/Product/<id>`.
    pub product_id: String,

    /// Variants to create (1 to 250).
    pub variants: Vec<VariantFields>,

    pub strategy: Option<VariantCreateStrategy>,
}

pub struct CreateProductVariantsTool;

#[async_trait]
impl ShopifyTool for CreateProductVariantsTool {
    const NAME: &'static str = "create-product-variants";
    const DESCRIPTION: &'static str = "Create one or more variants on a product. Each variant \
        names its option values (e.g. Size=M) and may set price, compare-at price, SKU, barcode \
        and tax/inventory flags.";
    type Params = CreateProductVariantsParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        let mut v = Violations::new();
        v.id("productId", GidKind::Product, &params.product_id);
        v.check(
            (1..=MAX_VARIANTS_PER_CALL).contains(&params.variants.len()),
            "variants",
            "must contain between 1 and 250 variants",
        );
        for (i, variant) in params.variants.iter().enumerate() {
            variant.check(&format!("variants[{i}]"), &mut v);
        }
        v.finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let product_id = gid("productId", GidKind::Product, &params.product_id)?;
        let variants: Vec<Value> = params
            .variants
            .iter()
            .map(|variant| variant.to_bulk_input(None))
            .collect();

        let data = ctx
            .client
            .mutate(
                &document(MUTATION, &[VARIANT_FIELDS]),
                json!({ "productId": product_id, "variants": variants, "strategy": params.strategy }),
            )
            .await?;

        let payload = mutation_payload(data, "productVariantsBulkCreate")?;
        Ok(payload_field(payload, "productVariants", "variants"))
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
    async fn test_creates_variants() {
        let server = MockServer::start().await;
        mock_graphql(
            &server,
            "CreateProductVariants",
            json!({ "productVariantsBulkCreate": {
                "productVariants": [{ "id": "gid://shopify/ProductVariant/21", "sku": "TEE-L" }],
                "userErrors": []
            }}),
        )
        .await;

        let output = run_tool::<CreateProductVariantsTool>(
            args(json!({
                "productId": "2",
                "strategy": "REMOVE_STANDALONE_VARIANT",
                "variants": [{
                    "price": "20.00",
                    "sku": "TEE-L",
                    "optionValues": [{ "optionName": "Size", "name": "L" }]
                }]
            })),
            &context_for(&server),
        )
        .await;
        assert!(output.success);
        assert_eq!(output.data["variants"][0]["sku"], "TEE-L");

        let body = received_body(&server).await;
        assert_eq!(body["variables"]["productId"], "gid://shopify/Product/2");
        assert_eq!(body["variables"]["strategy"], "REMOVE_STANDALONE_VARIANT");
        assert_eq!(body["variables"]["variants"][0]["inventoryItem"]["sku"], "TEE-L");
    }

    #[tokio::test]
    async fn test_empty_variant_list_rejected() {
        let output = run_tool::<CreateProductVariantsTool>(
            args(json!({ "productId": "2", "variants": [] })),
            &offline_context(),
        )
        .await;
        assert!(!output.success);
        assert_eq!(output.metadata.unwrap()["violations"][0]["field"], "variants");
    }
}
