//! Resilient GraphQL client for the Shopify Admin API.
//!
//! Reads (`query`) are retried with exponential backoff on transient
//! failures; writes (`mutate`) run exactly once since a failed attempt may
//! already have been applied server-side.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use super::auth::AccessTokenReceiver;
use super::error::{ErrorKind, Operation, RpcError, ShopifyError, truncate_document};
use super::retry::RetryPolicy;
use crate::core::config::ShopifyConfig;

/// Header carrying the Admin API access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Maximum characters of an error response body kept in messages.
const ERROR_BODY_PREVIEW_CHARS: usize = 500;

const HEALTH_CHECK_QUERY: &str = "query HealthCheck { shop { name } }";

/// Shopify Admin API GraphQL client.
///
/// Cheap to clone; all clones share the HTTP connection pool and the live
/// access-token header.
#[derive(Clone)]
pub struct ShopifyClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    endpoint: String,
    token: AccessTokenReceiver,
    policy: RetryPolicy,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    extensions: Option<Value>,
}

impl GraphQLErrorResponse {
    /// Message with the error code appended when one is reported.
    fn describe(&self) -> String {
        match self
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .and_then(Value::as_str)
        {
            Some(code) => format!("{} ({code})", self.message),
            None => self.message.clone(),
        }
    }
}

/// Failure of a single attempt, before retry bookkeeping.
#[derive(Debug)]
struct AttemptFailure {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
}

impl AttemptFailure {
    fn transient(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            kind: ErrorKind::Transient,
            message: message.into(),
            status,
        }
    }
}

impl ShopifyClient {
    /// Create a client for an explicit endpoint.
    pub fn new(
        endpoint: impl Into<String>,
        token: AccessTokenReceiver,
        timeout: Duration,
        policy: RetryPolicy,
    ) -> Result<Self, ShopifyError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                endpoint: endpoint.into(),
                token,
                policy,
            }),
        })
    }

    /// Create a client for the configured store.
    pub fn from_config(
        config: &ShopifyConfig,
        token: AccessTokenReceiver,
    ) -> Result<Self, ShopifyError> {
        Self::new(
            config.graphql_endpoint(),
            token,
            config.timeout,
            RetryPolicy::new(config.retry_attempts),
        )
    }

    /// GraphQL endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.inner.policy
    }

    /// Execute a read operation, retrying transient failures.
    pub async fn query(&self, document: &str, variables: Value) -> Result<Value, ShopifyError> {
        let max_attempts = self.inner.policy.max_attempts();
        self.execute(Operation::Query, document, &variables, max_attempts)
            .await
    }

    /// Execute a write operation exactly once.
    pub async fn mutate(&self, document: &str, variables: Value) -> Result<Value, ShopifyError> {
        self.execute(Operation::Mutation, document, &variables, 1)
            .await
    }

    /// Confirm connectivity and credentials with a trivial query.
    ///
    /// Never fails; any error yields `false`.
    pub async fn health_check(&self) -> bool {
        match self
            .execute(Operation::Query, HEALTH_CHECK_QUERY, &json!({}), 1)
            .await
        {
            Ok(data) => {
                let shop = data
                    .pointer("/shop/name")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                info!("Connected to shop: {}", shop);
                true
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                false
            }
        }
    }

    #[instrument(skip(self, document, variables), fields(operation = %operation))]
    async fn execute(
        &self,
        operation: Operation,
        document: &str,
        variables: &Value,
        max_attempts: u32,
    ) -> Result<Value, ShopifyError> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(attempt, max_attempts, "Sending GraphQL request");

            let failure = match self.send_once(document, variables).await {
                Ok(data) => {
                    if attempt > 1 {
                        info!(attempt, "GraphQL {} succeeded after retry", operation);
                    }
                    return Ok(data);
                }
                Err(failure) => failure,
            };

            if !failure.kind.is_retryable() || attempt >= max_attempts {
                warn!(
                    attempt,
                    kind = %failure.kind,
                    status = failure.status,
                    "GraphQL {} failed: {}",
                    operation,
                    failure.message
                );
                return Err(rpc_error(operation, document, variables, failure, attempt).into());
            }

            let delay = self.inner.policy.delay_for(attempt);
            warn!(
                attempt,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                "GraphQL {} failed, retrying: {}",
                operation,
                failure.message
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn send_once(&self, document: &str, variables: &Value) -> Result<Value, AttemptFailure> {
        // Clone the current header value; a concurrent refresh only affects
        // later requests.
        let access_token = self.inner.token.borrow().clone();
        let body = json!({ "query": document, "variables": variables });

        let response = self
            .inner
            .http
            .post(&self.inner.endpoint)
            .header(ACCESS_TOKEN_HEADER, access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AttemptFailure::transient(describe_transport_error(&e), None))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AttemptFailure {
                kind: classify_status(status.as_u16()),
                message: format!("HTTP {}: {}", status.as_u16(), preview(&text)),
                status: Some(status.as_u16()),
            });
        }

        let payload: GraphQLResponse = response.json().await.map_err(|e| {
            AttemptFailure::transient(format!("invalid response body: {e}"), Some(status.as_u16()))
        })?;

        // Errors inside a 2xx body are transient; only 4xx is final.
        if let Some(errors) = payload.errors
            && !errors.is_empty()
        {
            let message = errors
                .iter()
                .map(GraphQLErrorResponse::describe)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AttemptFailure::transient(
                format!("GraphQL errors: {message}"),
                Some(status.as_u16()),
            ));
        }

        payload
            .data
            .ok_or_else(|| AttemptFailure::transient("No data in response", Some(status.as_u16())))
    }
}

/// Map an HTTP status to an error kind.
///
/// Every 4xx is final, 429 included.
fn classify_status(status: u16) -> ErrorKind {
    match status {
        401 | 403 => ErrorKind::Authentication,
        400..=499 => ErrorKind::Validation,
        _ => ErrorKind::Transient,
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        format!("request failed: {err}")
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= ERROR_BODY_PREVIEW_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
    format!("{head}...")
}

fn rpc_error(
    operation: Operation,
    document: &str,
    variables: &Value,
    failure: AttemptFailure,
    attempts: u32,
) -> RpcError {
    let variable_keys = variables
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();

    RpcError {
        kind: failure.kind,
        operation,
        document: truncate_document(document),
        variable_keys,
        message: failure.message,
        attempts,
        status: failure.status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::watch;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GRAPHQL_PATH: &str = "/admin/api/2026-01/graphql.json";

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries)
            .with_base_delay(Duration::from_millis(1))
            .with_jitter(Duration::ZERO)
    }

    fn client_for(server: &MockServer, max_retries: u32) -> (ShopifyClient, watch::Sender<String>) {
        let (tx, rx) = watch::channel("shpat_test".to_string());
        let client = ShopifyClient::new(
            format!("{}{}", server.uri(), GRAPHQL_PATH),
            rx,
            Duration::from_secs(5),
            fast_policy(max_retries),
        )
        .unwrap();
        (client, tx)
    }

    async fn request_count(server: &MockServer) -> usize {
        server.received_requests().await.unwrap().len()
    }

    #[tokio::test]
    async fn test_query_returns_data_and_sends_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(header(ACCESS_TOKEN_HEADER, "shpat_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "shop": { "name": "Demo" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _tx) = client_for(&server, 3);
        let data = client.query(HEALTH_CHECK_QUERY, json!({})).await.unwrap();
        assert_eq!(data["shop"]["name"], "Demo");
    }

    #[tokio::test]
    async fn test_transient_query_makes_retries_plus_one_attempts() {
        for retries in 0..=3u32 {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
                .mount(&server)
                .await;

            let (client, _tx) = client_for(&server, retries);
            let err = client.query("query { shop { name } }", json!({})).await.unwrap_err();

            let rpc = err.rpc().expect("classified rpc error");
            assert_eq!(rpc.attempts, retries + 1);
            assert_eq!(rpc.kind, ErrorKind::Transient);
            assert_eq!(rpc.status, Some(503));
            assert_eq!(request_count(&server).await, (retries + 1) as usize);
        }
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        for status in [400u16, 401, 403, 404] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let (client, _tx) = client_for(&server, 3);
            let err = client.query("query { shop { name } }", json!({})).await.unwrap_err();

            assert_eq!(err.rpc().unwrap().attempts, 1);
            assert!(!err.kind().is_retryable());
            assert_eq!(request_count(&server).await, 1);
        }
    }

    #[tokio::test]
    async fn test_auth_status_classified_as_authentication() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let (client, _tx) = client_for(&server, 3);
        let err = client.query("query { shop { name } }", json!({})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Exceeded 2 calls per second"))
            .mount(&server)
            .await;

        let (client, _tx) = client_for(&server, 3);
        let err = client.query("query { shop { name } }", json!({})).await.unwrap_err();

        let rpc = err.rpc().unwrap();
        assert_eq!(rpc.attempts, 1);
        assert_eq!(rpc.kind, ErrorKind::Validation);
        assert_eq!(rpc.status, Some(429));
        assert_eq!(request_count(&server).await, 1);
    }

    #[tokio::test]
    async fn test_query_recovers_after_transient_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "shop": { "name": "Demo" } }
            })))
            .with_priority(2)
            .mount(&server)
            .await;

        let (client, _tx) = client_for(&server, 3);
        let data = client.query("query { shop { name } }", json!({})).await.unwrap();
        assert_eq!(data["shop"]["name"], "Demo");
        assert_eq!(request_count(&server).await, 2);
    }

    #[tokio::test]
    async fn test_mutation_never_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (client, _tx) = client_for(&server, 5);
        let err = client
            .mutate(
                "mutation { productDelete(input: {id: \"x\"}) { deletedProductId } }",
                json!({}),
            )
            .await
            .unwrap_err();

        let rpc = err.rpc().unwrap();
        assert_eq!(rpc.attempts, 1);
        assert_eq!(rpc.operation, Operation::Mutation);
        assert_eq!(request_count(&server).await, 1);
    }

    #[tokio::test]
    async fn test_graphql_errors_in_ok_response_are_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{ "message": "Internal error" }]
            })))
            .mount(&server)
            .await;

        let (client, _tx) = client_for(&server, 3);
        let err = client.query("query { shop { name } }", json!({})).await.unwrap_err();
        let rpc = err.rpc().unwrap();
        assert_eq!(rpc.kind, ErrorKind::Transient);
        assert_eq!(rpc.attempts, 4);
        assert_eq!(rpc.status, Some(200));
        assert!(rpc.message.contains("Internal error"));
        assert_eq!(request_count(&server).await, 4);
    }

    #[tokio::test]
    async fn test_graphql_errors_in_mutation_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{ "message": "Field 'bogus' doesn't exist on type 'Mutation'" }]
            })))
            .mount(&server)
            .await;

        let (client, _tx) = client_for(&server, 3);
        let err = client.mutate("mutation { bogus }", json!({})).await.unwrap_err();
        assert_eq!(err.rpc().unwrap().attempts, 1);
        assert!(err.to_string().contains("bogus"));
        assert_eq!(request_count(&server).await, 1);
    }

    #[tokio::test]
    async fn test_throttled_graphql_error_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{ "message": "Throttled", "extensions": { "code": "THROTTLED" } }]
            })))
            .mount(&server)
            .await;

        let (client, _tx) = client_for(&server, 1);
        let err = client.query("query { shop { name } }", json!({})).await.unwrap_err();
        assert_eq!(err.rpc().unwrap().attempts, 2);
        assert!(err.rpc().unwrap().message.contains("(THROTTLED)"));
        assert_eq!(request_count(&server).await, 2);
    }

    #[tokio::test]
    async fn test_error_carries_variable_keys_not_values() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (client, _tx) = client_for(&server, 0);
        let err = client
            .mutate(
                "mutation CustomerUpdate($input: CustomerInput!) { customerUpdate(input: $input) { userErrors { field message } } }",
                json!({ "input": { "email": "private@example.com" } }),
            )
            .await
            .unwrap_err();

        let rpc = err.rpc().unwrap();
        assert_eq!(rpc.variable_keys, vec!["input".to_string()]);
        assert!(rpc.document.starts_with("mutation CustomerUpdate"));
        assert!(!format!("{err} {rpc:?}").contains("private@example.com"));
    }

    #[tokio::test]
    async fn test_timeout_is_transient() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": {} }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let (_tx, rx) = watch::channel("shpat_test".to_string());
        let client = ShopifyClient::new(
            format!("{}{}", server.uri(), GRAPHQL_PATH),
            rx,
            Duration::from_millis(50),
            fast_policy(1),
        )
        .unwrap();

        let err = client.query("query { shop { name } }", json!({})).await.unwrap_err();
        let rpc = err.rpc().unwrap();
        assert_eq!(rpc.kind, ErrorKind::Transient);
        assert_eq!(rpc.attempts, 2);
        assert!(rpc.message.contains("timed out"));
    }

    #[tokio::test]
    async fn test_token_hot_swap_applies_to_next_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header(ACCESS_TOKEN_HEADER, "shpat_rotated"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "shop": { "name": "Demo" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, tx) = client_for(&server, 0);
        tx.send_replace("shpat_rotated".to_string());

        assert!(client.query("query { shop { name } }", json!({})).await.is_ok());
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "shop": { "name": "Demo" } }
            })))
            .mount(&server)
            .await;
        let (client, _tx) = client_for(&server, 3);
        assert!(client.health_check().await);

        let failing = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&failing)
            .await;
        let (client, _tx) = client_for(&failing, 3);
        assert!(!client.health_check().await);
        assert_eq!(request_count(&failing).await, 1);
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(401), ErrorKind::Authentication);
        assert_eq!(classify_status(403), ErrorKind::Authentication);
        assert_eq!(classify_status(404), ErrorKind::Validation);
        assert_eq!(classify_status(422), ErrorKind::Validation);
        assert_eq!(classify_status(429), ErrorKind::Validation);
        assert_eq!(classify_status(500), ErrorKind::Transient);
        assert_eq!(classify_status(503), ErrorKind::Transient);
    }
}
