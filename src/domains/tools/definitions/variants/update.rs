//! Bulk variant update tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{MAX_VARIANTS_PER_CALL, VARIANT_FIELDS, VariantFields};
use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{
    Violations, document, gid, mutation_payload, payload_field,
};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation UpdateProductVariants($productId: ID!, $variants: [ProductVariantsBulkInput!]!) {
  productVariantsBulkUpdate(productId: $productId, variants: $variants) {
    productVariants { ...VariantFields }
    userErrors { field message }
  }
}
"#;

/// Changes for one existing variant.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantUpdate {
    /// Variant id, numeric or `gid://shopify/ProductVariant/<id>`.
    pub id: String,

    #[serde(flatten)]
    pub fields: VariantFields,
}

/// Parameters for updating variants.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductVariantsParams {
    /// Product id, numeric or `gid://shopify/Product/<id>`.
    pub product_id: String,

    /// Variants to update (1 to 250); omitted fields are left unchanged.
    pub variants: Vec<VariantUpdate>,
}

pub struct UpdateProductVariantsTool;

#[async_trait]
impl ShopifyTool for UpdateProductVariantsTool {
    const NAME: &'static str = "update-product-variants";
    const DESCRIPTION: &'static str = "Update price, compare-at price, SKU, barcode, tax or \
        inventory flags and option values of existing variants of a product.";
    type Params = UpdateProductVariantsParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        let mut v = Violations::new();
        v.id("productId", GidKind::Product, &params.product_id);
        v.check(
            (1..=MAX_VARIANTS_PER_CALL).contains(&params.variants.len()),
            "variants",
            "must contain between 1 and 250 variants",
        );
        for (i, variant) in params.variants.iter().enumerate() {
            let prefix = format!("variants[{i}]");
            v.id(&format!("{prefix}.id"), GidKind::ProductVariant, &variant.id);
            v.check(!variant.fields.is_empty(), &prefix, "no fields to update");
            variant.fields.check(&prefix, &mut v);
        }
        v.finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let product_id = gid("productId", GidKind::Product, &params.product_id)?;
        let variants = params
            .variants
            .iter()
            .map(|variant| {
                let id = gid("variants.id", GidKind::ProductVariant, &variant.id)?;
                Ok(variant.fields.to_bulk_input(Some(id)))
            })
            .collect::<Result<Vec<Value>, ToolError>>()?;

        let data = ctx
            .client
            .mutate(
                &document(MUTATION, &[VARIANT_FIELDS]),
                json!({ "productId": product_id, "variants": variants }),
            )
            .await?;

        let payload = mutation_payload(data, "productVariantsBulkUpdate")?;
        Ok(payload_field(payload, "productVariants", "variants"))
    }
}
