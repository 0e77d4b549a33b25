//! Product creation tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::{PRODUCT_DETAIL, PRODUCT_SUMMARY, ProductStatus};
use crate::domains::tools::definitions::common::{
    Violations, document, mutation_payload, payload_field,
};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation CreateProduct($product: ProductCreateInput!) {
  productCreate(product: $product) {
    product { ...ProductDetail }
    userErrors { field message }
  }
}
"#;

/// Search engine listing fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct SeoInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parameters for creating a product.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductParams {
    /// Product title.
    pub title: String,

    /// Description as HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,

    /// URL handle; generated from the title when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Initial status (default: DRAFT on the store side).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoInput>,
}

pub struct CreateProductTool;

#[async_trait]
impl ShopifyTool for CreateProductTool {
    const NAME: &'static str = "create-product";
    const DESCRIPTION: &'static str = "Create a product with title, description, vendor, type, \
        tags, status and SEO fields. Variants and options are managed with the dedicated tools.";
    type Params = CreateProductParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        let mut v = Violations::new();
        v.not_blank("title", &params.title);
        if let Some(handle) = &params.handle {
            v.not_blank("handle", handle);
        }
        v.finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let data = ctx
            .client
            .mutate(
                &document(MUTATION, &[PRODUCT_DETAIL, PRODUCT_SUMMARY]),
                json!({ "product": params }),
            )
            .await?;

        let payload = mutation_payload(data, "productCreate")?;
        let out = payload_field(payload, "product", "product");
        info!(id = ?out.get("product").and_then(|p| p.get("id")), "Product created");
        Ok(out)
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
    async fn test_sends_only_provided_fields() {
        let server = MockServer::start().await;
        mock_graphql(
            &server,
            "CreateProduct",
            json!({ "productCreate": {
                "product": { "id": "gid://shopify/Product/1", "title": "Tee" },
                "userErrors": []
            }}),
        )
        .await;

        let output = run_tool::<CreateProductTool>(
            args(json!({ "title": "Tee", "status": "ACTIVE", "tags": ["summer"] })),
            &context_for(&server),
        )
        .await;
        assert!(output.success);
        assert_eq!(output.data["product"]["id"], "gid://shopify/Product/1");

        let body = received_body(&server).await;
        assert_eq!(
            body["variables"]["product"],
            json!({ "title": "Tee", "status": "ACTIVE", "tags": ["summer"] })
        );
    }

    #[tokio::test]
    async fn test_blank_title_rejected() {
        let output = run_tool::<CreateProductTool>(args(json!({ "title": "  " })), &offline_context()).await;
        assert!(!output.success);
        assert!(output.error.unwrap().contains("title: must not be empty"));
    }

    #[tokio::test]
    async fn test_user_errors_fail_the_call() {
        let server = MockServer::start().await;
        mock_graphql(
            &server,
            "CreateProduct",
            json!({ "productCreate": {
                "product": null,
                "userErrors": [{ "field": ["handle"], "message": "Handle has already been taken" }]
            }}),
        )
        .await;

        let output = run_tool::<CreateProductTool>(
            args(json!({ "title": "Tee", "handle": "tee" })),
            &context_for(&server),
        )
        .await;
        assert!(!output.success);
        assert_eq!(output.error.unwrap(), "handle: Handle has already been taken");
    }
}
