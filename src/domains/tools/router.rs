//! Tool Router - builds the rmcp ToolRouter for the active tools.
//!
//! Each active [`ToolId`] becomes one route bound to the shared
//! [`ToolContext`]. The match below is exhaustive, so adding a tool without
//! wiring it here does not compile.

use futures::FutureExt;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};

use super::definitions::*;
use super::handlers::{ShopifyTool, ToolContext, run_tool};
use super::registry::{ToolId, tool_metadata};

/// Create the route for one tool.
pub fn create_route<T, S>(ctx: ToolContext) -> ToolRoute<S>
where
    T: ShopifyTool,
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(tool_metadata::<T>(), move |call: ToolCallContext<'_, S>| {
        let args = call.arguments.clone().unwrap_or_default();
        let ctx = ctx.clone();
        async move {
            let output = run_tool::<T>(args, &ctx).await;
            Ok::<_, McpError>(output.into_call_result())
        }
        .boxed()
    })
}

fn route_for<S>(id: ToolId, ctx: ToolContext) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    match id {
        ToolId::GetProducts => create_route::<GetProductsTool, S>(ctx),
        ToolId::GetProductById => create_route::<GetProductByIdTool, S>(ctx),
        ToolId::CreateProduct => create_route::<CreateProductTool, S>(ctx),
        ToolId::UpdateProduct => create_route::<UpdateProductTool, S>(ctx),
        ToolId::DeleteProduct => create_route::<DeleteProductTool, S>(ctx),
        ToolId::GetProductVariants => create_route::<GetProductVariantsTool, S>(ctx),
        ToolId::CreateProductVariants => create_route::<CreateProductVariantsTool, S>(ctx),
        ToolId::UpdateProductVariants => create_route::<UpdateProductVariantsTool, S>(ctx),
        ToolId::DeleteProductVariants => create_route::<DeleteProductVariantsTool, S>(ctx),
        ToolId::CreateProductOptions => create_route::<CreateProductOptionsTool, S>(ctx),
        ToolId::UpdateProductOption => create_route::<UpdateProductOptionTool, S>(ctx),
        ToolId::DeleteProductOptions => create_route::<DeleteProductOptionsTool, S>(ctx),
        ToolId::GetCustomers => create_route::<GetCustomersTool, S>(ctx),
        ToolId::GetCustomerById => create_route::<GetCustomerByIdTool, S>(ctx),
        ToolId::CreateCustomer => create_route::<CreateCustomerTool, S>(ctx),
        ToolId::UpdateCustomer => create_route::<UpdateCustomerTool, S>(ctx),
        ToolId::DeleteCustomer => create_route::<DeleteCustomerTool, S>(ctx),
        ToolId::GetCustomerOrders => create_route::<GetCustomerOrdersTool, S>(ctx),
        ToolId::GetOrders => create_route::<GetOrdersTool, S>(ctx),
        ToolId::GetOrderById => create_route::<GetOrderByIdTool, S>(ctx),
        ToolId::CreateOrder => create_route::<CreateOrderTool, S>(ctx),
        ToolId::UpdateOrder => create_route::<UpdateOrderTool, S>(ctx),
        ToolId::DeleteOrder => create_route::<DeleteOrderTool, S>(ctx),
    }
}

/// Build the tool router with the given tools, in order.
pub fn build_tool_router<S>(ctx: &ToolContext, tools: &[ToolId]) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    tools
        .iter()
        .fold(ToolRouter::new(), |router, id| {
            router.with_route(route_for(*id, ctx.clone()))
        })
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::tools::test_support::offline_context;

    struct TestServer {}

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(&offline_context(), &ToolId::ALL);
        let tools = router.list_all();
        assert_eq!(tools.len(), 23);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"get-products"));
        assert!(names.contains(&"create-product-variants"));
        assert!(names.contains(&"delete-product-options"));
        assert!(names.contains(&"get-customer-orders"));
        assert!(names.contains(&"update-order"));
    }

    #[test]
    fn test_router_respects_active_subset() {
        let active = [ToolId::GetOrders, ToolId::GetOrderById];
        let router: ToolRouter<TestServer> = build_tool_router(&offline_context(), &active);
        let mut names: Vec<_> = router
            .list_all()
            .iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["get-order-by-id", "get-orders"]);
    }

    #[test]
    fn test_empty_package_builds_empty_router() {
        let router: ToolRouter<TestServer> = build_tool_router(&offline_context(), &[]);
        assert!(router.list_all().is_empty());
    }

    #[test]
    fn test_registry_matches_router() {
        let registry_names = ToolRegistry::tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(&offline_context(), &ToolId::ALL);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
