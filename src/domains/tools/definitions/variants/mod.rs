//! Product variant tools.
//!
//! Variants are always written through the bulk mutations, which take the
//! owning product id plus a list of variant inputs.

mod create;
mod delete;
mod list;
mod update;

pub use create::{CreateProductVariantsParams, CreateProductVariantsTool, VariantCreateStrategy};
pub use delete::{DeleteProductVariantsParams, DeleteProductVariantsTool};
pub use list::{GetProductVariantsParams, GetProductVariantsTool};
pub use update::{UpdateProductVariantsParams, UpdateProductVariantsTool, VariantUpdate};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domains::tools::definitions::common::Violations;

/// Bulk mutations accept at most this many variants per call.
pub(crate) const MAX_VARIANTS_PER_CALL: usize = 250;

pub(crate) const VARIANT_FIELDS: &str = r#"
fragment VariantFields on ProductVariant {
  id
  title
  sku
  barcode
  price
  compareAtPrice
  taxable
  inventoryQuantity
  position
  selectedOptions { name value }
  inventoryItem { id tracked }
}
"#;

/// An option value selected by a variant, e.g. `Color` = `Blue`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantOptionValue {
    /// Option name, e.g. `Color`.
    pub option_name: String,
    /// Value name, e.g. `Blue`.
    pub name: String,
}

/// Variant attributes shared by create and update.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantFields {
    /// Price as a decimal string, e.g. `"19.99"`.
    pub price: Option<String>,

    /// Compare-at price as a decimal string.
    pub compare_at_price: Option<String>,

    pub sku: Option<String>,

    pub barcode: Option<String>,

    pub taxable: Option<bool>,

    /// Whether inventory is tracked for this variant.
    pub tracked: Option<bool>,

    /// Option values identifying the variant.
    #[serde(default)]
    pub option_values: Vec<VariantOptionValue>,
}

impl VariantFields {
    /// Shape into a `ProductVariantsBulkInput`.
    pub(crate) fn to_bulk_input(&self, id: Option<String>) -> Value {
        let mut input = Map::new();
        if let Some(id) = id {
            input.insert("id".to_string(), json!(id));
        }
        insert_some(&mut input, "price", &self.price);
        insert_some(&mut input, "compareAtPrice", &self.compare_at_price);
        insert_some(&mut input, "barcode", &self.barcode);
        insert_some(&mut input, "taxable", &self.taxable);
        if !self.option_values.is_empty() {
            input.insert("optionValues".to_string(), json!(self.option_values));
        }

        let mut inventory_item = Map::new();
        insert_some(&mut inventory_item, "sku", &self.sku);
        insert_some(&mut inventory_item, "tracked", &self.tracked);
        if !inventory_item.is_empty() {
            input.insert("inventoryItem".to_string(), Value::Object(inventory_item));
        }

        Value::Object(input)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.compare_at_price.is_none()
            && self.sku.is_none()
            && self.barcode.is_none()
            && self.taxable.is_none()
            && self.tracked.is_none()
            && self.option_values.is_empty()
    }

    pub(crate) fn check(&self, prefix: &str, v: &mut Violations) {
        if let Some(price) = &self.price {
            v.check(is_money(price), &format!("{prefix}.price"), "must be a non-negative decimal");
        }
        if let Some(price) = &self.compare_at_price {
            v.check(
                is_money(price),
                &format!("{prefix}.compareAtPrice"),
                "must be a non-negative decimal",
            );
        }
        for (i, value) in self.option_values.iter().enumerate() {
            v.not_blank(&format!("{prefix}.optionValues[{i}].optionName"), &value.option_name);
            v.not_blank(&format!("{prefix}.optionValues[{i}].name"), &value.name);
        }
    }
}

fn insert_some<T: Serialize>(map: &mut Map<String, Value>, key: &str, value: &Option<T>) {
    if let Some(value) = value {
        map.insert(key.to_string(), json!(value));
    }
}

fn is_money(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|amount| amount.is_finite() && amount >= 0.0)
}
