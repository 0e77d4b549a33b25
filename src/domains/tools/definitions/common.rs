//! Common utilities shared across Shopify tools.
//!
//! Argument validation, GraphQL document assembly and the reshaping of
//! Admin API payloads into tool results.

use serde_json::Value;

use crate::core::shopify::{GidKind, ShopifyError, UserError, flatten_edges, flatten_page, to_gid};
use crate::domains::tools::error::{FieldViolation, ToolError};
use crate::domains::tools::handlers::ToolData;

/// Default page size for list tools.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page the Admin API serves.
pub const MAX_LIMIT: u32 = 250;

pub fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Collects field-level violations while validating tool arguments.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok`.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.0.push(FieldViolation::new(field, message));
        }
        self
    }

    pub fn limit(&mut self, limit: u32) -> &mut Self {
        self.check(
            (1..=MAX_LIMIT).contains(&limit),
            "limit",
            "must be between 1 and 250",
        )
    }

    pub fn not_blank(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), field, "must not be empty")
    }

    /// Require a bare numeric id or a GID of `kind`.
    pub fn id(&mut self, field: &str, kind: GidKind, value: &str) -> &mut Self {
        if let Err(e) = to_gid(kind, value) {
            self.0.push(FieldViolation::new(field, e.to_string()));
        }
        self
    }

    pub fn ids(&mut self, field: &str, kind: GidKind, values: &[String]) -> &mut Self {
        for (i, value) in values.iter().enumerate() {
            self.id(&format!("{field}[{i}]"), kind, value);
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), Vec<FieldViolation>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.0))
        }
    }
}

/// Qualify an argument that already passed validation.
pub fn gid(field: &str, kind: GidKind, value: &str) -> Result<String, ToolError> {
    to_gid(kind, value).map_err(|e| ToolError::invalid_field(field, e.to_string()))
}

/// Append fragment definitions to an operation.
pub fn document(operation: &str, fragments: &[&str]) -> String {
    let mut doc = operation.trim().to_string();
    for fragment in fragments {
        doc.push('\n');
        doc.push_str(fragment.trim());
    }
    doc
}

/// Take the payload of mutation `root`, failing on any reported user error.
pub fn mutation_payload(mut data: Value, root: &str) -> Result<Value, ToolError> {
    let mut payload = data
        .get_mut(root)
        .map(Value::take)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ShopifyError::Decode(format!("missing {root} payload")))?;
    check_user_errors(&mut payload)?;
    Ok(payload)
}

/// Remove `userErrors` from a payload; a non-empty list is an error.
pub fn check_user_errors(payload: &mut Value) -> Result<(), ShopifyError> {
    let Some(errors) = payload.as_object_mut().and_then(|p| p.remove("userErrors")) else {
        return Ok(());
    };

    let errors: Vec<UserError> = serde_json::from_value(errors)
        .map_err(|e| ShopifyError::Decode(format!("invalid userErrors: {e}")))?;
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ShopifyError::UserErrors(errors))
    }
}

/// `{key: [...nodes], pageInfo}` from the connection at `data[root]`.
pub fn page_data(mut data: Value, root: &str, key: &str) -> Result<ToolData, ToolError> {
    let connection = data
        .get_mut(root)
        .map(Value::take)
        .ok_or_else(|| ShopifyError::Decode(format!("missing {root} connection")))?;
    let page = flatten_page(connection)?;

    let mut out = ToolData::new();
    out.insert(key.to_string(), Value::Array(page.items));
    out.insert(
        "pageInfo".to_string(),
        serde_json::to_value(page.page_info).unwrap_or(Value::Null),
    );
    Ok(out)
}

/// `{key: entity}` from `data[root]`; a null entity is "not found".
pub fn entity_data(mut data: Value, root: &str, key: &str, id: &str) -> Result<ToolData, ToolError> {
    let entity = data.get_mut(root).map(Value::take).unwrap_or(Value::Null);
    if entity.is_null() {
        return Err(ToolError::not_found(format!("{key} {id}")));
    }
    Ok(single(key, flatten_edges(entity)))
}

/// `{key: field}` from a mutation payload, with nested connections flattened.
pub fn payload_field(mut payload: Value, field: &str, key: &str) -> ToolData {
    let value = payload.get_mut(field).map(Value::take).unwrap_or(Value::Null);
    single(key, flatten_edges(value))
}

pub fn single(key: &str, value: Value) -> ToolData {
    let mut out = ToolData::new();
    out.insert(key.to_string(), value);
    out
}
