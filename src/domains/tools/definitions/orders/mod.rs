//! Order tools.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::{CreateOrderParams, CreateOrderTool, FinancialStatus, LineItemInput};
pub use delete::{DeleteOrderParams, DeleteOrderTool};
pub use get::{GetOrderByIdParams, GetOrderByIdTool};
pub use list::{GetOrdersParams, GetOrdersTool, OrderStatusFilter};
pub use update::{UpdateOrderParams, UpdateOrderTool};

pub(crate) const ORDER_SUMMARY: &str = r#"
fragment OrderSummary on Order {
  id
  name
  createdAt
  updatedAt
  email
  displayFinancialStatus
  displayFulfillmentStatus
  cancelledAt
  closedAt
  tags
  totalPriceSet { shopMoney { amount currencyCode } }
  customer { id displayName email }
}
"#;

pub(crate) const ORDER_DETAIL: &str = r#"
fragment OrderDetail on Order {
  ...OrderSummary
  note
  phone
  poNumber
  subtotalPriceSet { shopMoney { amount currencyCode } }
  totalTaxSet { shopMoney { amount currencyCode } }
  totalShippingPriceSet { shopMoney { amount currencyCode } }
  totalDiscountsSet { shopMoney { amount currencyCode } }
  shippingAddress { address1 address2 city province provinceCode country countryCodeV2 zip phone name }
  lineItems(first: 50) {
    edges {
      node {
        id
        title
        quantity
        sku
        variant { id title }
        originalUnitPriceSet { shopMoney { amount currencyCode } }
      }
    }
  }
}
"#;
