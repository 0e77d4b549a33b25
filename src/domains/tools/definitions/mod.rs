//! Tool definitions module.
//!
//! One submodule per store entity; each tool is defined in its own file.

pub mod common;
pub mod customers;
pub mod options;
pub mod orders;
pub mod products;
pub mod variants;

pub use customers::{
    CreateCustomerTool, DeleteCustomerTool, GetCustomerByIdTool, GetCustomerOrdersTool,
    GetCustomersTool, UpdateCustomerTool,
};
pub use options::{CreateProductOptionsTool, DeleteProductOptionsTool, UpdateProductOptionTool};
pub use orders::{
    CreateOrderTool, DeleteOrderTool, GetOrderByIdTool, GetOrdersTool, UpdateOrderTool,
};
pub use products::{
    CreateProductTool, DeleteProductTool, GetProductByIdTool, GetProductsTool, UpdateProductTool,
};
pub use variants::{
    CreateProductVariantsTool, DeleteProductVariantsTool, GetProductVariantsTool,
    UpdateProductVariantsTool,
};
