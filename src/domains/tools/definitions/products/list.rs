//! Product listing tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{PRODUCT_SUMMARY, ProductStatus};
use crate::domains::tools::definitions::common::{Violations, default_limit, document, page_data};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const QUERY: &str = r#"
query GetProducts($first: Int!, $after: String, $query: String) {
  products(first: $first, after: $after, query: $query, sortKey: UPDATED_AT, reverse: true) {
    edges { node { ...ProductSummary } }
    pageInfo { hasNextPage endCursor }
  }
}
"#;

/// Parameters for listing products.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetProductsParams {
    /// Maximum number of products to return (default: 10, max: 250).
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Cursor from a previous page's `pageInfo.endCursor`.
    pub after: Option<String>,

    /// Search query in Shopify search syntax, e.g. `title:shirt vendor:Acme`.
    pub query: Option<String>,

    /// Only return products with this status.
    pub status: Option<ProductStatus>,
}

/// Lists products, most recently updated first.
pub struct GetProductsTool;

impl GetProductsTool {
    fn search_query(params: &GetProductsParams) -> Option<String> {
        let terms: Vec<String> = params
            .query
            .iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .chain(params.status.map(|s| format!("status:{}", s.as_search_term())))
            .collect();
        (!terms.is_empty()).then(|| terms.join(" "))
    }
}

#[async_trait]
impl ShopifyTool for GetProductsTool {
    const NAME: &'static str = "get-products";
    const DESCRIPTION: &'static str = "List products with optional search query and status filter. \
        Returns id, title, handle, status, vendor, price range and inventory for each product, \
        plus pageInfo for cursor pagination.";
    type Params = GetProductsParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        Violations::new().limit(params.limit).finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let query = Self::search_query(&params);
        debug!(limit = params.limit, query = ?query, "Listing products");

        let data = ctx
            .client
            .query(
                &document(QUERY, &[PRODUCT_SUMMARY]),
                json!({ "first": params.limit, "after": params.after, "query": query }),
            )
            .await?;

        page_data(data, "products", "products")
    }
}
