//! Domains module containing business logic organized by bounded contexts.
//!
//! The server exposes a single domain: tools that operate on a Shopify
//! store through the Admin API.

pub mod tools;
