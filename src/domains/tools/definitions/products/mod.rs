//! Product tools.
//!
//! Fragments shared by the product queries and mutations live here so every
//! tool returns the same product shape.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::{CreateProductParams, CreateProductTool};
pub use delete::{DeleteProductParams, DeleteProductTool};
pub use get::{GetProductByIdParams, GetProductByIdTool};
pub use list::{GetProductsParams, GetProductsTool};
pub use update::{UpdateProductParams, UpdateProductTool};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Publication status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Archived,
    Draft,
}

impl ProductStatus {
    /// Value used in the `status:` search filter.
    pub fn as_search_term(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Draft => "draft",
        }
    }
}

/// Fields returned for every product in a listing.
pub(crate) const PRODUCT_SUMMARY: &str = r#"
fragment ProductSummary on Product {
  id
  title
  handle
  status
  vendor
  productType
  tags
  totalInventory
  createdAt
  updatedAt
  priceRangeV2 {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
}
"#;

/// Full product, including options and the first variants.
pub(crate) const PRODUCT_DETAIL: &str = r#"
fragment ProductDetail on Product {
  ...ProductSummary
  descriptionHtml
  seo { title description }
  options {
    id
    name
    position
    optionValues { id name hasVariants }
  }
  variants(first: 50) {
    edges {
      node {
        id
        title
        sku
        price
        compareAtPrice
        inventoryQuantity
        selectedOptions { name value }
      }
    }
  }
}
"#;
