//! Bulk variant deletion tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::MAX_VARIANTS_PER_CALL;
use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{Violations, gid, mutation_payload};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation DeleteProductVariants($productId: ID!, $variantsIds: [ID!]!) {
  productVariantsBulkDelete(productId: $productId, variantsIds: $variantsIds) {
    product { id title }
    userErrors { field message }
  }
}
"#;

/// Parameters for deleting variants.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductVariantsParams {
    /// Product id, numeric or `gid://shopify/Product/<id>`.
    pub product_id: String,

    /// Variant ids to delete, numeric or GID.
    pub variant_ids: Vec<String>,
}

pub struct DeleteProductVariantsTool;

#[async_trait]
impl ShopifyTool for DeleteProductVariantsTool {
    const NAME: &'static str = "delete-product-variants";
    const DESCRIPTION: &'static str = "Delete one or more variants from a product.";
    type Params = DeleteProductVariantsParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new()
            .id("productId", GidKind::Product, &params.product_id)
            .check(
                (1..=MAX_VARIANTS_PER_CALL).contains(&params.variant_ids.len()),
                "variantIds",
                "must contain between 1 and 250 ids",
            )
            .ids("variantIds", GidKind::ProductVariant, &params.variant_ids)
            .finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let product_id = gid("productId", GidKind::Product, &params.product_id)?;
        let variant_ids = params
            .variant_ids
            .iter()
            .map(|id| gid("variantIds", GidKind::ProductVariant, id))
            .collect::<Result<Vec<_>, _>>()?;

        let data = ctx
            .client
            .mutate(
                MUTATION,
                json!({ "productId": product_id, "variantsIds": variant_ids }),
            )
            .await?;

        mutation_payload(data, "productVariantsBulkDelete")?;
        info!("Deleted {} variant(s) from {}", variant_ids.len(), product_id);

        let mut out = ToolData::new();
        out.insert("productId".to_string(), json!(product_id));
        out.insert("deletedVariantIds".to_string(), json!(variant_ids));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::run_tool;
    use crate::domains::tools::test_support::{args, context_for, mock_graphql, offline_context};
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_reports_deleted_ids() {
        let server = MockServer::start().await;
        mock_graphql(
            &server,
            "DeleteProductVariants",
            json!({ "productVariantsBulkDelete": { "product": { "id": "gid://shopify/Product/4" }, "userErrors": [] } }),
        )
        .await;

        let output = run_tool::<DeleteProductVariantsTool>(
            args(json!({ "productId": "4", "variantIds": ["41", "gid://shopify/ProductVariant/42"] })),
            &context_for(&server),
        )
        .await;
        assert!(output.success);
        assert_eq!(
            output.data["deletedVariantIds"],
            json!(["gid://shopify/ProductVariant/41", "gid://shopify/ProductVariant/42"])
        );
    }

    #[tokio::test]
    async fn test_bad_variant_id_points_at_index() {
        let output = run_tool::<DeleteProductVariantsTool>(
            args(json!({ "productId": "4", "variantIds": ["41", "x"] })),
            &offline_context(),
        )
        .await;
        assert_eq!(output.metadata.unwrap()["violations"][0]["field"], "variantIds[1]");
    }
}
