//! Single product lookup tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::{PRODUCT_DETAIL, PRODUCT_SUMMARY};
use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{Violations, document, entity_data, gid};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const QUERY: &str = r#"
query GetProductById($id: ID!) {
  product(id: $id) { ...ProductDetail }
}
"#;

/// Parameters for fetching one product.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetProductByIdParams {
    /// Product id, numeric or `gid://shopify/Product/<id>`.
    pub product_id: String,
}

pub struct GetProductByIdTool;

#[async_trait]
impl ShopifyTool for GetProductByIdTool {
    const NAME: &'static str = "get-product-by-id";
    const DESCRIPTION: &'static str = "Get a product by id, including description, SEO fields, \
        options with their values and up to 50 variants.";
    type Params = GetProductByIdParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new()
            .id("productId", GidKind::Product, &params.product_id)
            .finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let id = gid("productId", GidKind::Product, &params.product_id)?;
        let data = ctx
            .client
            .query(
                &document(QUERY, &[PRODUCT_DETAIL, PRODUCT_SUMMARY]),
                json!({ "id": id }),
            )
            .await?;

        entity_data(data, "product", "product", &id)
    }
}
