//! Product update tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::create::SeoInput;
use super::{PRODUCT_DETAIL, PRODUCT_SUMMARY, ProductStatus};
use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{
    Violations, document, gid, mutation_payload, payload_field,
};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation UpdateProduct($product: ProductUpdateInput!) {
  productUpdate(product: $product) {
    product { ...ProductDetail }
    userErrors { field message }
  }
}
"#;

/// Parameters for updating a product. Omitted fields are left unchanged.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductParams {
    /// Product id, numeric or `gid://shopify/Product/<id>`.
    pub product_id: String,

    pub title: Option<String>,

    /// Description as HTML.
    pub description_html: Option<String>,

    pub handle: Option<String>,

    pub vendor: Option<String>,

    pub product_type: Option<String>,

    /// Replaces the full tag list.
    pub tags: Option<Vec<String>>,

    pub status: Option<ProductStatus>,

    pub seo: Option<SeoInput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductUpdateInput {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seo: Option<SeoInput>,
}

impl UpdateProductParams {
    fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.description_html.is_some()
            || self.handle.is_some()
            || self.vendor.is_some()
            || self.product_type.is_some()
            || self.tags.is_some()
            || self.status.is_some()
            || self.seo.is_some()
    }
}

pub struct UpdateProductTool;

#[async_trait]
impl ShopifyTool for UpdateProductTool {
    const NAME: &'static str = "update-product";
    const DESCRIPTION: &'static str = "Update a product's title, description, handle, vendor, \
        type, tags, status or SEO fields. Only the provided fields are changed.";
    type Params = UpdateProductParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        let mut v = Violations::new();
        v.id("productId", GidKind::Product, &params.product_id);
        v.check(params.has_changes(), "product", "at least one field to update is required");
        if let Some(title) = &params.title {
            v.not_blank("title", title);
        }
        v.finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let input = ProductUpdateInput {
            id: gid("productId", GidKind::Product, &params.product_id)?,
            title: params.title,
            description_html: params.description_html,
            handle: params.handle,
            vendor: params.vendor,
            product_type: params.product_type,
            tags: params.tags,
            status: params.status,
            seo: params.seo,
        };

        let data = ctx
            .client
            .mutate(
                &document(MUTATION, &[PRODUCT_DETAIL, PRODUCT_SUMMARY]),
                json!({ "product": input }),
            )
            .await?;

        let payload = mutation_payload(data, "productUpdate")?;
        Ok(payload_field(payload, "product", "product"))
    }
}
