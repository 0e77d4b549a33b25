//! Global identifier (GID) helpers.
//!
//! The Admin API addresses entities as `gid://shopify/<Type>/<id>`; tools
//! accept either that form or the bare numeric id.

use std::fmt;

use thiserror::Error;

const GID_PREFIX: &str = "gid://shopify/";

/// Entity types addressed by the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GidKind {
    Product,
    ProductVariant,
    ProductOption,
    ProductOptionValue,
    Customer,
    Order,
}

impl GidKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::ProductVariant => "ProductVariant",
            Self::ProductOption => "ProductOption",
            Self::ProductOptionValue => "ProductOptionValue",
            Self::Customer => "Customer",
            Self::Order => "Order",
        }
    }
}

impl fmt::Display for GidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identifier that is neither numeric nor a GID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} id '{value}': expected a numeric id or gid://shopify/{kind}/<id>")]
pub struct GidError {
    pub kind: GidKind,
    pub value: String,
}

/// Produce the fully-qualified GID for `id`.
///
/// Already-qualified ids are returned unchanged.
///
/// ```rust
/// use shopify_mcp_server::core::shopify::{to_gid, GidKind};
///
/// assert_eq!(to_gid(GidKind::Product, "123").unwrap(), "gid://shopify/Product/123");
/// ```
pub fn to_gid(kind: GidKind, id: &str) -> Result<String, GidError> {
    let id = id.trim();

    if id.starts_with(GID_PREFIX) {
        return Ok(id.to_string());
    }

    if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
        return Ok(format!("{GID_PREFIX}{}/{id}", kind.as_str()));
    }

    Err(GidError {
        kind,
        value: id.to_string(),
    })
}

/// Extract the bare id from a GID; non-GID input is returned trimmed.
///
/// Query parameters (`?...`) on the GID are dropped.
pub fn from_gid(gid: &str) -> String {
    let gid = gid.trim();
    let Some(rest) = gid.strip_prefix(GID_PREFIX) else {
        return gid.to_string();
    };
    let rest = rest.split('?').next().unwrap_or(rest);
    rest.rsplit('/').next().unwrap_or(rest).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id_is_qualified() {
        assert_eq!(
            to_gid(GidKind::Product, "123").unwrap(),
            "gid://shopify/Product/123"
        );
        assert_eq!(
            to_gid(GidKind::ProductVariant, " 42 ").unwrap(),
            "gid://shopify/ProductVariant/42"
        );
    }

    #[test]
    fn test_qualified_id_unchanged() {
        let gid = "gid://shopify/Customer/987";
        assert_eq!(to_gid(GidKind::Customer, gid).unwrap(), gid);
    }

    #[test]
    fn test_invalid_id_rejected() {
        let err = to_gid(GidKind::Order, "abc").unwrap_err();
        assert_eq!(err.kind, GidKind::Order);
        assert!(err.to_string().contains("abc"));
        assert!(to_gid(GidKind::Order, "").is_err());
    }

    #[test]
    fn test_from_gid() {
        assert_eq!(from_gid("gid://shopify/Order/999"), "999");
        assert_eq!(from_gid("gid://shopify/Order/999?x=1"), "999");
        assert_eq!(from_gid("999"), "999");
    }
}
