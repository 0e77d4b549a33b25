//! Product option creation tool.

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
mutation CreateProductOptions(
  $productId: ID!
  $options: [OptionCreateInput!]!
  $variantStrategy: ProductOptionCreateVariantStrategy
) {
  productOptionsCreate(productId: $productId, options: $options, variantStrategy: $variantStrategy) {
    product { ...ProductOptions }
    userErrors { field message }
  }
}
"#;

/// Whether new option values also create variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionCreateVariantStrategy {
    /// Existing variants get the first value; no new variants.
    LeaveAsIs,
    /// Create a variant for every value combination.
    Create,
}

/// A new option with its values.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct OptionInput {
    /// Option name, e.g. `Size`.
    pub name: String,

    /// 1-based position among the product's options.
    pub position: Option<u32>,

    /// Value names, e.g. `["S", "M", "L"]`.
    pub values: Vec<String>,
}

/// Parameters for adding options to a product.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductOptionsParams {
    /// Product id, numeric or `gid://shopify/Product/<id>`.
    pub product_id: String,

    pub options: Vec<OptionInput>,

    pub variant_strategy: Option<OptionCreateVariantStrategy>,
}

pub struct CreateProductOptionsTool;

#[async_trait]
impl ShopifyTool for CreateProductOptionsTool {
    const NAME: &'static str = "create-product-options";
    const DESCRIPTION: &'static str = "Add options (such as Size or Color) with their values to a \
        product, optionally creating a variant for every combination.";
    type Params = CreateProductOptionsParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        let mut v = Violations::new();
        v.id("productId", GidKind::Product, &params.product_id);
        v.check(!params.options.is_empty(), "options", "at least one option is required");
        for (i, option) in params.options.iter().enumerate() {
            v.not_blank(&format!("options[{i}].name"), &option.name);
            v.check(
                !option.values.is_empty(),
                &format!("options[{i}].values"),
                "at least one value is required",
            );
            v.check(
                option.position != Some(0),
                &format!("options[{i}].position"),
                "positions start at 1",
            );
        }
        v.finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let product_id = gid("productId", GidKind::Product, &params.product_id)?;
        let options: Vec<_> = params
            .options
            .iter()
            .map(|option| {
                let values: Vec<_> = option.values.iter().map(|name| json!({ "name": name })).collect();
                let mut input = json!({ "name": option.name, "values": values });
                if let Some(position) = option.position {
                    input["position"] = json!(position);
                }
                input
            })
            .collect();

        let data = ctx
            .client
            .mutate(
                &document(MUTATION, &[PRODUCT_OPTIONS]),
                json!({
                    "productId": product_id,
                    "options": options,
                    "variantStrategy": params.variant_strategy,
                }),
            )
            .await?;

        let payload = mutation_payload(data, "productOptionsCreate")?;
        Ok(payload_field(payload, "product", "product"))
    }
}
