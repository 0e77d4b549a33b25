//! Tool Registry - the closed set of tools this server can expose.
//!
//! [`ToolId`] is the single source of truth: package files, the router and
//! tool listings all go through it, so an unknown tool name is rejected
//! when it is parsed rather than when it is dispatched.

use std::fmt;
use std::str::FromStr;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::definitions::*;
use super::error::ToolError;
use super::handlers::ShopifyTool;

/// Identifier of every tool known to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    GetProducts,
    GetProductById,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    GetProductVariants,
    CreateProductVariants,
    UpdateProductVariants,
    DeleteProductVariants,
    CreateProductOptions,
    UpdateProductOption,
    DeleteProductOptions,
    GetCustomers,
    GetCustomerById,
    CreateCustomer,
    UpdateCustomer,
    DeleteCustomer,
    GetCustomerOrders,
    GetOrders,
    GetOrderById,
    CreateOrder,
    UpdateOrder,
    DeleteOrder,
}

impl ToolId {
    /// Every tool, in listing order.
    pub const ALL: [ToolId; 23] = [
        ToolId::GetProducts,
        ToolId::GetProductById,
        ToolId::CreateProduct,
        ToolId::UpdateProduct,
        ToolId::DeleteProduct,
        ToolId::GetProductVariants,
        ToolId::CreateProductVariants,
        ToolId::UpdateProductVariants,
        ToolId::DeleteProductVariants,
        ToolId::CreateProductOptions,
        ToolId::UpdateProductOption,
        ToolId::DeleteProductOptions,
        ToolId::GetCustomers,
        ToolId::GetCustomerById,
        ToolId::CreateCustomer,
        ToolId::UpdateCustomer,
        ToolId::DeleteCustomer,
        ToolId::GetCustomerOrders,
        ToolId::GetOrders,
        ToolId::GetOrderById,
        ToolId::CreateOrder,
        ToolId::UpdateOrder,
        ToolId::DeleteOrder,
    ];

    /// Wire name of the tool.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetProducts => GetProductsTool::NAME,
            Self::GetProductById => GetProductByIdTool::NAME,
            Self::CreateProduct => CreateProductTool::NAME,
            Self::UpdateProduct => UpdateProductTool::NAME,
            Self::DeleteProduct => DeleteProductTool::NAME,
            Self::GetProductVariants => GetProductVariantsTool::NAME,
            Self::CreateProductVariants => CreateProductVariantsTool::NAME,
            Self::UpdateProductVariants => UpdateProductVariantsTool::NAME,
            Self::DeleteProductVariants => DeleteProductVariantsTool::NAME,
            Self::CreateProductOptions => CreateProductOptionsTool::NAME,
            Self::UpdateProductOption => UpdateProductOptionTool::NAME,
            Self::DeleteProductOptions => DeleteProductOptionsTool::NAME,
            Self::GetCustomers => GetCustomersTool::NAME,
            Self::GetCustomerById => GetCustomerByIdTool::NAME,
            Self::CreateCustomer => CreateCustomerTool::NAME,
            Self::UpdateCustomer => UpdateCustomerTool::NAME,
            Self::DeleteCustomer => DeleteCustomerTool::NAME,
            Self::GetCustomerOrders => GetCustomerOrdersTool::NAME,
            Self::GetOrders => GetOrdersTool::NAME,
            Self::GetOrderById => GetOrderByIdTool::NAME,
            Self::CreateOrder => CreateOrderTool::NAME,
            Self::UpdateOrder => UpdateOrderTool::NAME,
            Self::DeleteOrder => DeleteOrderTool::NAME,
        }
    }

    /// Whether the tool only reads from the store.
    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            Self::GetProducts
                | Self::GetProductById
                | Self::GetProductVariants
                | Self::GetCustomers
                | Self::GetCustomerById
                | Self::GetCustomerOrders
                | Self::GetOrders
                | Self::GetOrderById
        )
    }

    /// Tool metadata as listed to MCP clients.
    pub fn to_tool(self) -> Tool {
        match self {
            Self::GetProducts => tool_metadata::<GetProductsTool>(),
            Self::GetProductById => tool_metadata::<GetProductByIdTool>(),
            Self::CreateProduct => tool_metadata::<CreateProductTool>(),
            Self::UpdateProduct => tool_metadata::<UpdateProductTool>(),
            Self::DeleteProduct => tool_metadata::<DeleteProductTool>(),
            Self::GetProductVariants => tool_metadata::<GetProductVariantsTool>(),
            Self::CreateProductVariants => tool_metadata::<CreateProductVariantsTool>(),
            Self::UpdateProductVariants => tool_metadata::<UpdateProductVariantsTool>(),
            Self::DeleteProductVariants => tool_metadata::<DeleteProductVariantsTool>(),
            Self::CreateProductOptions => tool_metadata::<CreateProductOptionsTool>(),
            Self::UpdateProductOption => tool_metadata::<UpdateProductOptionTool>(),
            Self::DeleteProductOptions => tool_metadata::<DeleteProductOptionsTool>(),
            Self::GetCustomers => tool_metadata::<GetCustomersTool>(),
            Self::GetCustomerById => tool_metadata::<GetCustomerByIdTool>(),
            Self::CreateCustomer => tool_metadata::<CreateCustomerTool>(),
            Self::UpdateCustomer => tool_metadata::<UpdateCustomerTool>(),
            Self::DeleteCustomer => tool_metadata::<DeleteCustomerTool>(),
            Self::GetCustomerOrders => tool_metadata::<GetCustomerOrdersTool>(),
            Self::GetOrders => tool_metadata::<GetOrdersTool>(),
            Self::GetOrderById => tool_metadata::<GetOrderByIdTool>(),
            Self::CreateOrder => tool_metadata::<CreateOrderTool>(),
            Self::UpdateOrder => tool_metadata::<UpdateOrderTool>(),
            Self::DeleteOrder => tool_metadata::<DeleteOrderTool>(),
        }
    }
}

/// Build the MCP tool model for a tool type.
pub fn tool_metadata<T: ShopifyTool>() -> Tool {
    Tool {
        name: T::NAME.into(),
        description: Some(T::DESCRIPTION.into()),
        input_schema: cached_schema_for_type::<T::Params>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolId {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ToolError::UnknownTool(s.to_string()))
    }
}

impl Serialize for ToolId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ToolId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - lists the tools the server knows about.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        ToolId::ALL.iter().map(|id| id.as_str()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        ToolId::ALL.iter().map(|id| id.to_tool()).collect()
    }

    /// Tool models for the given identifiers, in order.
    pub fn tools_for(ids: &[ToolId]) -> Vec<Tool> {
        ids.iter().map(|id| id.to_tool()).collect()
    }
}
