//! Flattening of GraphQL connection (edges/node/pageInfo) structures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ShopifyError;

/// Cursor information of a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One flattened page of a connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    pub page_info: PageInfo,
}

/// Recursively replace every `{edges: [{node}]}` object with the plain
/// array of its nodes.
///
/// Nested `pageInfo` is dropped; use [`flatten_page`] on the top-level
/// connection to keep the cursor.
pub fn flatten_edges(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            if let Some(Value::Array(edges)) = map.remove("edges") {
                let nodes = edges
                    .into_iter()
                    .filter_map(|mut edge| edge.get_mut("node").map(Value::take))
                    .map(flatten_edges)
                    .collect();
                return Value::Array(nodes);
            }
            Value::Object(
                map.into_iter()
                    .map(|(key, inner)| (key, flatten_edges(inner)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(flatten_edges).collect()),
        other => other,
    }
}

/// Flatten a top-level connection into its nodes plus cursor information.
pub fn flatten_page(mut connection: Value) -> Result<Page, ShopifyError> {
    let page_info = match connection.get_mut("pageInfo").map(Value::take) {
        Some(info) => serde_json::from_value(info)
            .map_err(|e| ShopifyError::Decode(format!("invalid pageInfo: {e}")))?,
        None => PageInfo::default(),
    };

    if connection.get("edges").is_none() {
        return Err(ShopifyError::Decode(
            "expected a connection with edges".to_string(),
        ));
    }

    match flatten_edges(connection) {
        Value::Array(items) => Ok(Page { items, page_info }),
        _ => Err(ShopifyError::Decode(
            "connection edges were not an array".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_connections() {
        let product = json!({
            "id": "gid://shopify/Product/1",
            "variants": {
                "edges": [
                    { "node": { "id": "gid://shopify/ProductVariant/10" } },
                    { "node": { "id": "gid://shopify/ProductVariant/11" } }
                ]
            },
            "images": { "edges": [] }
        });

        let flat = flatten_edges(product);
        assert_eq!(flat["variants"].as_array().unwrap().len(), 2);
        assert_eq!(flat["variants"][1]["id"], "gid://shopify/ProductVariant/11");
        assert_eq!(flat["images"], json!([]));
    }

    #[test]
    fn test_flatten_page_keeps_order_and_cursor() {
        let connection = json!({
            "edges": [
                { "node": { "id": "a" } },
                { "node": { "id": "b" } },
                { "node": { "id": "c" } }
            ],
            "pageInfo": { "hasNextPage": true, "endCursor": "cursor-3" }
        });

        let page = flatten_page(connection).unwrap();
        let ids: Vec<_> = page.items.iter().map(|n| n["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(page.page_info.has_next_page);
        assert_eq!(page.page_info.end_cursor.as_deref(), Some("cursor-3"));
    }

    #[test]
    fn test_flatten_page_rejects_non_connection() {
        assert!(flatten_page(json!({ "id": "x" })).is_err());
    }
}
