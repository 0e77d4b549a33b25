//! Masking of secrets before they reach logs or tool failure metadata.

use serde_json::Value;

/// Character used to hide the middle of a secret.
const MASK_CHAR: char = '*';

/// Number of characters kept visible at each end of a masked secret.
const VISIBLE_EDGE: usize = 4;

/// Object keys whose string values are masked by [`redact_json`].
const SENSITIVE_KEY_FRAGMENTS: &[&str] = &[
    "token",
    "secret",
    "password",
    "authorization",
    "apikey",
    "api_key",
];

/// Mask a secret value for inclusion in logs or error metadata.
///
/// Values longer than eight characters keep their first and last four
/// characters; shorter values are masked entirely.
///
/// ```rust
/// use shopify_mcp_server::core::security::mask_secret;
///
/// assert_eq!(mask_secret("shpat_1234567890"), "shpa********7890");
/// assert_eq!(mask_secret("short"), "*****");
/// ```
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();

    if chars.len() <= VISIBLE_EDGE * 2 {
        return MASK_CHAR.to_string().repeat(chars.len());
    }

    let head: String = chars[..VISIBLE_EDGE].iter().collect();
    let tail: String = chars[chars.len() - VISIBLE_EDGE..].iter().collect();
    let middle = MASK_CHAR.to_string().repeat(chars.len() - VISIBLE_EDGE * 2);

    format!("{head}{middle}{tail}")
}

/// Returns true when an object key names credential material.
pub fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase().replace('-', "_");
    SENSITIVE_KEY_FRAGMENTS
        .iter()
        .any(|fragment| key.contains(fragment))
}

/// Deep-copy a JSON value, masking string values stored under sensitive keys.
pub fn redact_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, inner)| {
                    let redacted = match inner {
                        Value::String(s) if is_sensitive_key(key) => Value::String(mask_secret(s)),
                        other => redact_json(other),
                    };
                    (key.clone(), redacted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_json).collect()),
        other => other.clone(),
    }
}
