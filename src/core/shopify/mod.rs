//! Shopify Admin API access.
//!
//! - `auth`: token provider (static token or client-credentials with refresh)
//! - `client`: GraphQL client with read/write retry policies
//! - `retry`: backoff policy
//! - `connection`: flattening of paginated edge/node structures
//! - `gid`: global identifier helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use serde_json::json;
//! use shopify_mcp_server::core::shopify::{ShopifyClient, TokenProvider};
//! # use shopify_mcp_server::core::Config;
//!
//! # async fn example(config: Config) -> Result<(), Box<dyn std::error::Error>> {
//! let provider = TokenProvider::from_config(&config.shopify)?;
//! provider.initialize().await?;
//!
//! let client = ShopifyClient::from_config(&config.shopify, provider.subscribe())?;
//! let data = client.query("query { shop { name } }", json!({})).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod connection;
pub mod error;
pub mod gid;
pub mod retry;

pub use auth::{AccessTokenReceiver, HttpTokenExchanger, IssuedToken, TokenExchanger, TokenProvider};
pub use client::ShopifyClient;
pub use connection::{Page, PageInfo, flatten_edges, flatten_page};
pub use error::{ErrorKind, Operation, RpcError, ShopifyError, UserError};
pub use gid::{GidError, GidKind, from_gid, to_gid};
pub use retry::RetryPolicy;
