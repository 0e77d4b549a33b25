//! Product option update tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::PRODUCT_OPTIONS;
use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{
    Violations, document, gid, mutation_payload, payload_field,
};
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation UpdateProductOption(
  $productId: ID!
  $option: OptionUpdateInput!
  $optionValuesToAdd: [OptionValueCreateInput!]
  $optionValuesToUpdate: [OptionValueUpdateInput!]
  $optionValuesToDelete: [ID!]
  $variantStrategy: ProductOptionUpdateVariantStrategy
) {
  productOptionUpdate(
    productId: $productId
    option: $option
    optionValuesToAdd: $optionValuesToAdd
    optionValuesToUpdate: $optionValuesToUpdate
    optionValuesToDelete: $optionValuesToDelete
    variantStrategy: $variantStrategy
  ) {
    product { ...ProductOptions }
    userErrors { field message }
  }
}
"#;

/// How variants follow added or removed option values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionUpdateVariantStrategy {
    LeaveAsIs,
    /// Create and delete variants to match the new value set.
    Manage,
}

/// Rename of an existing option value.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct OptionValueRename {
    /// Option value id, numeric or `gid://shopify/ProductOptionValue/<id>`.
    pub id: String,
    pub name: String,
}

/// Parameters for updating one option.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductOptionParams {
    /// Product id, numeric or `gid://shopify/Product/<id>`.
    pub product_id: String,

    /// Option id, numeric or `gid://shopify/ProductOption/<id>`.
    pub option_id: String,

    /// New option name.
    pub name: Option<String>,

    /// New 1-based position.
    pub position: Option<u32>,

    /// Value names to add.
    #[serde(default)]
    pub values_to_add: Vec<String>,

    #[serde(default)]
    pub values_to_update: Vec<OptionValueRename>,

    /// Option value ids to remove.
    #[serde(default)]
    pub values_to_delete: Vec<String>,

    pub variant_strategy: Option<OptionUpdateVariantStrategy>,
}

impl UpdateProductOptionParams {
    fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.position.is_some()
            || !self.values_to_add.is_empty()
            || !self.values_to_update.is_empty()
            || !self.values_to_delete.is_empty()
    }
}

pub struct UpdateProductOptionTool;

#[async_trait]
impl ShopifyTool for UpdateProductOptionTool {
    const NAME: &'static str = "update-product-option";
    const DESCRIPTION: &'static str = "Rename or reposition a product option and add, rename or \
        remove its values.";
    type Params = UpdateProductOptionParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        let mut v = Violations::new();
        v.id("productId", GidKind::Product, &params.product_id);
        v.id("optionId", GidKind::ProductOption, &params.option_id);
        v.check(params.has_changes(), "option", "nothing to update");
        v.check(params.position != Some(0), "position", "positions start at 1");
        if let Some(name) = &params.name {
            v.not_blank("name", name);
        }
        for (i, rename) in params.values_to_update.iter().enumerate() {
            v.id(
                &format!("valuesToUpdate[{i}].id"),
                GidKind::ProductOptionValue,
                &rename.id,
            );
            v.not_blank(&format!("valuesToUpdate[{i}].name"), &rename.name);
        }
        v.ids("valuesToDelete", GidKind::ProductOptionValue, &params.values_to_delete);
        v.finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let mut option = json!({ "id": gid("optionId", GidKind::ProductOption, &params.option_id)? });
        if let Some(name) = &params.name {
            option["name"] = json!(name);
        }
        if let Some(position) = params.position {
            option["position"] = json!(position);
        }

        let to_add: Vec<Value> = params
            .values_to_add
            .iter()
            .map(|name| json!({ "name": name }))
            .collect();
        let to_update = params
            .values_to_update
            .iter()
            .map(|rename| {
                let id = gid("valuesToUpdate.id", GidKind::ProductOptionValue, &rename.id)?;
                Ok(json!({ "id": id, "name": rename.name }))
            })
            .collect::<Result<Vec<Value>, ToolError>>()?;
        let to_delete = params
            .values_to_delete
            .iter()
            .map(|id| gid("valuesToDelete", GidKind::ProductOptionValue, id))
            .collect::<Result<Vec<_>, _>>()?;

        let data = ctx
            .client
            .mutate(
                &document(MUTATION, &[PRODUCT_OPTIONS]),
                json!({
                    "productId": gid("productId", GidKind::Product, &params.product_id)?,
                    "option": option,
                    "optionValuesToAdd": non_empty(to_add),
                    "optionValuesToUpdate": non_empty(to_update),
                    "optionValuesToDelete": non_empty(to_delete),
                    "variantStrategy": params.variant_strategy,
                }),
            )
            .await?;

        let payload = mutation_payload(data, "productOptionUpdate")?;
        Ok(payload_field(payload, "product", "product"))
    }
}

fn non_empty<T: Serialize>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
