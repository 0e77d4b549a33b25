//! Order creation tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::{ORDER_DETAIL, ORDER_SUMMARY};
use crate::core::shopify::GidKind;
use crate::domains::tools::definitions::common::{
    Violations, document, gid, mutation_payload, payload_field,
};
use crate::domains::tools::definitions::customers::AddressInput;
use crate::domains::tools::{FieldViolation, ShopifyTool, ToolContext, ToolData, ToolError};

const MUTATION: &str = r#"
mutation CreateOrder($order: OrderCreateOrderInput!, $options: OrderCreateOptionsInput) {
  orderCreate(order: $order, options: $options) {
    order { ...OrderDetail }
    userErrors { field message }
  }
}
"#;

/// Payment state recorded on the new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancialStatus {
    Pending,
    Authorized,
    PartiallyPaid,
    Paid,
    PartiallyRefunded,
    Refunded,
    Voided,
    Expired,
}

/// One line of the order: either an existing variant or a custom item.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    /// Variant id, numeric or GID. Omit for a custom item.
    pub variant_id: Option<String>,

    /// Title of a custom item.
    pub title: Option<String>,

    pub quantity: u32,

    /// Unit price as a decimal string; required for custom items.
    pub price: Option<String>,
}

/// Parameters for creating an order.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderParams {
    pub line_items: Vec<LineItemInput>,

    /// Customer to associate, numeric or GID.
    pub customer_id: Option<String>,

    pub email: Option<String>,

    /// Currency of custom line item prices, e.g. `USD`.
    pub currency: Option<String>,

    pub financial_status: Option<FinancialStatus>,

    pub note: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub shipping_address: Option<AddressInput>,

    /// Email an order confirmation to the customer (default: false).
    #[serde(default)]
    pub send_receipt: bool,
}

pub struct CreateOrderTool;

impl CreateOrderTool {
    fn line_item(item: &LineItemInput, currency: Option<&str>) -> Result<Value, ToolError> {
        let mut line = Map::new();
        line.insert("quantity".to_string(), json!(item.quantity));
        if let Some(variant_id) = &item.variant_id {
            line.insert(
                "variantId".to_string(),
                json!(gid("lineItems.variantId", GidKind::ProductVariant, variant_id)?),
            );
        }
        if let Some(title) = &item.title {
            line.insert("title".to_string(), json!(title));
        }
        if let (Some(price), Some(currency)) = (&item.price, currency) {
            line.insert(
                "priceSet".to_string(),
                json!({ "shopMoney": { "amount": price, "currencyCode": currency } }),
            );
        }
        Ok(Value::Object(line))
    }
}

#[async_trait]
impl ShopifyTool for CreateOrderTool {
    const NAME: &'static str = "create-order";
    const DESCRIPTION: &'static str = "Create an order from variant line items and/or custom \
        items, optionally linked to a customer, with shipping address, tags, note and financial \
        status.";
    type Params = CreateOrderParams;

    fn validate(params: &Self::Params) -> Result<(), Vec<FieldViolation>> {
        let mut v = Violations::new();
        v.check(!params.line_items.is_empty(), "lineItems", "at least one line item is required");
        for (i, item) in params.line_items.iter().enumerate() {
            let prefix = format!("lineItems[{i}]");
            v.check(item.quantity > 0, &format!("{prefix}.quantity"), "must be at least 1");
            match &item.variant_id {
                Some(id) => {
                    v.id(&format!("{prefix}.variantId"), GidKind::ProductVariant, id);
                }
                None => {
                    v.check(
                        item.title.as_deref().is_some_and(|t| !t.trim().is_empty()),
                        &format!("{prefix}.title"),
                        "required for a custom item",
                    );
                    v.check(
                        item.price.is_some(),
                        &format!("{prefix}.price"),
                        "required for a custom item",
                    );
                }
            }
        }
        if params.line_items.iter().any(|item| item.price.is_some()) {
            v.check(
                params.currency.is_some(),
                "currency",
                "required when a line item has a price",
            );
        }
        if let Some(customer_id) = &params.customer_id {
            v.id("customerId", GidKind::Customer, customer_id);
        }
        if let Some(currency) = &params.currency {
            v.check(
                currency.len() == 3 && currency.chars().all(|c| c.is_ascii_uppercase()),
                "currency",
                "must be a three-letter currency code",
            );
        }
        v.finish()
    }

    async fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolData, ToolError> {
        let line_items = params
            .line_items
            .iter()
            .map(|item| Self::line_item(item, params.currency.as_deref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut order = Map::new();
        order.insert("lineItems".to_string(), Value::Array(line_items));
        if let Some(customer_id) = &params.customer_id {
            let id = gid("customerId", GidKind::Customer, customer_id)?;
            order.insert("customer".to_string(), json!({ "toAssociate": { "id": id } }));
        }
        if let Some(email) = &params.email {
            order.insert("email".to_string(), json!(email));
        }
        if let Some(currency) = &params.currency {
            order.insert("currency".to_string(), json!(currency));
        }
        if let Some(status) = params.financial_status {
            order.insert("financialStatus".to_string(), json!(status));
        }
        if let Some(note) = &params.note {
            order.insert("note".to_string(), json!(note));
        }
        if !params.tags.is_empty() {
            order.insert("tags".to_string(), json!(params.tags));
        }
        if let Some(address) = &params.shipping_address {
            order.insert("shippingAddress".to_string(), json!(address));
        }

        let data = ctx
            .client
            .mutate(
                &document(MUTATION, &[ORDER_DETAIL, ORDER_SUMMARY]),
                json!({ "order": order, "options": { "sendReceipt": params.send_receipt } }),
            )
            .await?;

        let payload = mutation_payload(data, "orderCreate")?;
        Ok(payload_field(payload, "order", "order"))
    }
}
