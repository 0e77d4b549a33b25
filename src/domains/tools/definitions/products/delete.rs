//! Product deletion tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{Violations, gid, mutation_payload, payload_field};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation DeleteProduct($input: ProductDeleteInput!) {
  productDelete(input: $input) {
    deletedProductId
    userErrors { field message }
  }
}
"#;

/// Parameters for deleting a product.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductParams {
    /// Product id, numeric or `gid://shopify/Product/<id>`.
    pub product_id: String,
}

pub struct DeleteProductTool;

#[async_trait]
impl ShopifyTool for DeleteProductTool {
    const NAME: &'static str = "delete-product";
    const DESCRIPTION: &'static str =
        "Permanently delete a product and all of its variants. This cannot be undone.";
    type Params = DeleteProductParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new()
            .id("productId", GidKind::Product, &params.product_id)
            .finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let id = gid("productId", GidKind::Product, &params.product_id)?;
        let data = ctx
            .client
            .mutate(MUTATION, json!({ "input": { "id": id } }))
            .await?;

        let payload = mutation_payload(data, "productDelete")?;
        info!("Deleted product {}", id);
        Ok(payload_field(payload, "deletedProductId", "deletedProductId"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::run_tool;
    use crate::domains::tools::test_support::{args, context_for, received_body};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_delete_returns_deleted_id() {
        let server = MockServer::start().await;
        crate::domains::tools::test_support::mock_graphql(
            &server,
            "DeleteProduct",
            json!({ "productDelete": { "deletedProductId": "gid://shopify/Product/5", "userErrors": [] } }),
        )
        .await;

        let output =
            run_tool::<DeleteProductTool>(args(json!({ "productId": "5" })), &context_for(&server)).await;
        assert!(output.success);
        assert_eq!(output.data["deletedProductId"], "gid://shopify/Product/5");

        let body = received_body(&server).await;
        assert_eq!(body["variables"]["input"]["id"], "gid://shopify/Product/5");
    }

    #[tokio::test]
    async fn test_delete_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(crate::domains::tools::test_support::GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let output =
            run_tool::<DeleteProductTool>(args(json!({ "productId": "5" })), &context_for(&server)).await;
        let metadata = output.metadata.unwrap();
        assert_eq!(metadata["errorKind"], "transient");
        assert_eq!(metadata["attempts"], 1);
        assert_eq!(metadata["operation"], "mutation");
    }
}
