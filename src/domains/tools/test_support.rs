//! Shared fixtures for tool tests.

use std::sync::Arc;
use std::time::Duration;

use rmcp::model::JsonObject;
use serde_json::Value;
use tokio::sync::watch;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::handlers::{ToolContext, ToolOutput};
use crate::core::config::{Config, Credential, DEFAULT_API_VERSION, ShopifyConfig};
use crate::core::shopify::{RetryPolicy, ShopifyClient};

pub const GRAPHQL_PATH: &str = "/admin/api/2026-01/graphql.json";

pub fn test_config() -> Config {
    Config::new(ShopifyConfig {
        domain: "test.myshopify.com".to_string(),
        api_version: DEFAULT_API_VERSION.to_string(),
        credential: Credential::AccessToken("shpat_test".to_string()),
        timeout: Duration::from_secs(5),
        retry_attempts: 0,
    })
}

fn context_with_endpoint(endpoint: String) -> ToolContext {
    let (_, token) = watch::channel("shpat_test".to_string());
    let policy = RetryPolicy::new(0)
        .with_base_delay(Duration::from_millis(1))
        .with_jitter(Duration::ZERO);
    let client = ShopifyClient::new(endpoint, token, Duration::from_secs(5), policy)
        .expect("client builds");
    ToolContext::new(Arc::new(test_config()), client)
}

/// Context whose client must never be reached.
pub fn offline_context() -> ToolContext {
    context_with_endpoint(format!("http://127.0.0.1:9{GRAPHQL_PATH}"))
}

pub fn context_for(server: &MockServer) -> ToolContext {
    context_with_endpoint(format!("{}{GRAPHQL_PATH}", server.uri()))
}

/// Answer every GraphQL request whose body contains `operation` with `data`.
pub async fn mock_graphql(server: &MockServer, operation: &str, data: Value) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(operation))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": data })))
        .mount(server)
        .await;
}

pub fn args(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        other => panic!("arguments must be an object, got {other}"),
    }
}

pub fn output_json(output: &ToolOutput) -> Value {
    serde_json::to_value(output).expect("output serializes")
}

/// Body of the single request received by the mock server.
pub async fn received_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    serde_json::from_slice(&requests[0].body).expect("json body")
}
