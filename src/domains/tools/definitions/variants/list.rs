//! Product variant listing tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::VARIANT_FIELDS;
use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{Violations, default_limit, document, gid, page_data};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const QUERY: &str = r#"
query GetProductVariants($id: ID!, $first: Int!, $after: String) {
  product(id: $id) {
    id
    title
    variants(first: $first, after: $after) {
      edges { node { ...VariantFields } }
      pageInfo { hasNextPage endCursor }
    }
  }
}
"#;

/// Parameters for listing a product's variants.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetProductVariantsParams {
    /// Product id, numeric or `gid://shopify/Product/<id>`.
    pub product_id: String,

    /// Maximum number of variants to return (default: 10, max: 250).
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Cursor from a previous page's `pageInfo.endCursor`.
    pub after: Option<String>,
}

pub struct GetProductVariantsTool;

#[async_trait]
impl ShopifyTool for GetProductVariantsTool {
    const NAME: &'static str = "get-product-variants";
    const DESCRIPTION: &'static str = "List the variants of a product with price, SKU, barcode, \
        inventory quantity and selected option values.";
    type Params = GetProductVariantsParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new()
            .id("productId", GidKind::Product, &params.product_id)
            .limit(params.limit)
            .finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let id = gid("productId", GidKind::Product, &params.product_id)?;
        let mut data = ctx
            .client
            .query(
                &document(QUERY, &[VARIANT_FIELDS]),
                json!({ "id": id, "first": params.limit, "after": params.after }),
            )
            .await?;

        let product = data.get_mut("product").map(Value::take).unwrap_or(Value::Null);
        if product.is_null() {
            return Err(ToolError::not_found(format!("product {id}")));
        }

        let mut out = ToolData::new();
        out.insert("productId".to_string(), product["id"].clone());
        out.insert("productTitle".to_string(), product["title"].clone());
        out.extend(page_data(product, "variants", "variants")?);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::run_tool;
    use crate::domains::tools::test_support::{args, context_for, mock_graphql, output_json};
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_variants_page() {
        let server = MockServer::start().await;
        mock_graphql(
            &server,
            "GetProductVariants",
            json!({ "product": {
                "id": "gid://shopify/Product/1",
                "title": "Tee",
                "variants": {
                    "edges": [
                        { "node": { "id": "gid://shopify/ProductVariant/11", "sku": "TEE-S" } },
                        { "node": { "id": "gid://shopify/ProductVariant/12", "sku": "TEE-M" } }
                    ],
                    "pageInfo": { "hasNextPage": false, "endCursor": "c" }
                }
            }}),
        )
        .await;

        let output = run_tool::<GetProductVariantsTool>(
            args(json!({ "productId": "gid://shopify/Product/1", "limit": 2 })),
            &context_for(&server),
        )
        .await;
        let value = output_json(&output);
        assert_eq!(value["success"], true);
        assert_eq!(value["productTitle"], "Tee");
        assert_eq!(value["variants"][1]["sku"], "TEE-M");
        assert_eq!(value["pageInfo"]["hasNextPage"], false);
    }
}
