//! Tool packages: named subsets of tools activated together at startup.
//!
//! Packages come from an optional JSON file
//! (`{"packages":[{"name","description","tools":[...]}]}`) or, when that
//! file is absent or unusable, from the built-in set.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::registry::ToolId;
use crate::core::config::Config;
use crate::core::error::{Error, Result};

/// A named subset of tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPackage {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub tools: Vec<ToolId>,
}

impl ToolPackage {
    fn new(name: &str, description: &str, tools: impl IntoIterator<Item = ToolId>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            tools: tools.into_iter().collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PackageFile {
    packages: Vec<ToolPackage>,
}

/// Loaded packages plus the active selection.
#[derive(Debug, Clone)]
pub struct ToolPackageRegistry {
    packages: Vec<ToolPackage>,
    active: String,
}

impl ToolPackageRegistry {
    pub fn new(packages: Vec<ToolPackage>, active: impl Into<String>) -> Self {
        Self {
            packages,
            active: active.into(),
        }
    }

    /// Registry for the configured package name and package file.
    pub fn from_config(config: &Config) -> Self {
        let packages = match &config.tools.packages_file {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        };
        Self::new(packages, config.tools.package.clone())
    }

    /// Read package definitions from `path`.
    ///
    /// Never fails: a missing file silently yields the built-in packages,
    /// an unreadable or malformed one does too after a warning.
    pub fn load(path: &Path) -> Vec<ToolPackage> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No tool package file at {}, using built-in packages", path.display());
                return Self::builtin();
            }
            Err(e) => {
                warn!("Cannot read {}: {}; using built-in packages", path.display(), e);
                return Self::builtin();
            }
        };

        match serde_json::from_str::<PackageFile>(&content) {
            Ok(file) => {
                info!(
                    "Loaded {} tool package(s) from {}",
                    file.packages.len(),
                    path.display()
                );
                file.packages
            }
            Err(e) => {
                warn!("Invalid tool package file {}: {}; using built-in packages", path.display(), e);
                Self::builtin()
            }
        }
    }

    /// The packages available without any package file.
    pub fn builtin() -> Vec<ToolPackage> {
        use ToolId::*;

        vec![
            ToolPackage::new("none", "No tools", Vec::<ToolId>::new()),
            ToolPackage::new(
                "basic",
                "Read-only access to products, customers and orders",
                ToolId::ALL.into_iter().filter(|id| id.is_read_only()),
            ),
            ToolPackage::new("full", "Every available tool", ToolId::ALL),
            ToolPackage::new(
                "products",
                "Product, variant and option management",
                [
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
                ],
            ),
            ToolPackage::new(
                "customers",
                "Customer management and order history",
                [
                    GetCustomers,
                    GetCustomerById,
                    CreateCustomer,
                    UpdateCustomer,
                    DeleteCustomer,
                    GetCustomerOrders,
                ],
            ),
            ToolPackage::new(
                "orders",
                "Order management",
                [GetOrders, GetOrderById, CreateOrder, UpdateOrder, DeleteOrder],
            ),
        ]
    }

    /// All loaded packages.
    pub fn list(&self) -> &[ToolPackage] {
        &self.packages
    }

    pub fn package_names(&self) -> Vec<&str> {
        self.packages.iter().map(|p| p.name.as_str()).collect()
    }

    /// Name of the configured package.
    pub fn active_name(&self) -> &str {
        &self.active
    }

    /// Tools of the configured package, in package order.
    pub fn get_active_tools(&self) -> Result<Vec<ToolId>> {
        self.packages
            .iter()
            .find(|p| p.name == self.active)
            .map(|p| p.tools.clone())
            .ok_or_else(|| {
                Error::config(format!(
                    "Unknown tool package '{}'. Valid packages: {}",
                    self.active,
                    self.package_names().join(", ")
                ))
            })
    }

    /// Whether `name` belongs to the active package.
    pub fn is_tool_enabled(&self, name: &str) -> bool {
        let Ok(id) = name.parse::<ToolId>() else {
            return false;
        };
        self.get_active_tools()
            .map(|tools| tools.contains(&id))
            .unwrap_or(false)
    }
}
