//! Access token lifecycle for the Admin API.
//!
//! A static token is published once. Client credentials are exchanged for a
//! short-lived token at startup and refreshed in the background five minutes
//! before expiry; each refresh is pushed to the RPC client through a
//! `watch` channel so live tool instances pick it up without a restart.

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument};

use super::error::ShopifyError;
use crate::core::config::{Credential, ShopifyConfig};
use crate::core::security::mask_secret;

/// Refresh this long before the token expires.
pub const REFRESH_MARGIN: Duration = Duration::from_secs(5 * 60);

/// Backoff after a failed background refresh.
pub const REFRESH_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: u64 = 86_399;

/// Receiving side of the live access-token header.
pub type AccessTokenReceiver = watch::Receiver<String>;

/// Token returned by the OAuth token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_expires_in() -> u64 {
    DEFAULT_EXPIRES_IN_SECS
}

/// Current token and its expiry.
#[derive(Debug, Clone)]
pub struct TokenState {
    pub access_token: String,
    /// `None` for static tokens, which never expire locally.
    pub expires_at: Option<Instant>,
}

/// Performs one client-credentials exchange.
#[async_trait]
pub trait TokenExchanger: Send + Sync + 'static {
    async fn exchange(&self) -> Result<IssuedToken, ShopifyError>;
}

/// Exchanges client credentials at the store's OAuth endpoint.
pub struct HttpTokenExchanger {
    http: reqwest::Client,
    endpoint: String,
    client_id: String,
    client_secret: String,
}

impl HttpTokenExchanger {
    pub fn new(
        endpoint: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ShopifyError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        })
    }
}

#[async_trait]
impl TokenExchanger for HttpTokenExchanger {
    async fn exchange(&self) -> Result<IssuedToken, ShopifyError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| ShopifyError::TokenExchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ShopifyError::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<IssuedToken>()
            .await
            .map_err(|e| ShopifyError::TokenExchange(format!("invalid token response: {e}")))
    }
}

enum TokenSource {
    Static(String),
    Exchange(Arc<dyn TokenExchanger>),
}

/// Produces and keeps fresh the bearer credential.
pub struct TokenProvider {
    source: TokenSource,
    state: Arc<RwLock<Option<TokenState>>>,
    header: Arc<watch::Sender<String>>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl TokenProvider {
    /// Build the provider for the configured credential.
    pub fn from_config(config: &ShopifyConfig) -> Result<Self, ShopifyError> {
        match &config.credential {
            Credential::AccessToken(token) => Ok(Self::with_static_token(token.clone())),
            Credential::ClientCredentials {
                client_id,
                client_secret,
            } => {
                let exchanger = HttpTokenExchanger::new(
                    config.token_endpoint(),
                    client_id.clone(),
                    client_secret.clone(),
                    config.timeout,
                )?;
                Ok(Self::with_exchanger(Arc::new(exchanger)))
            }
        }
    }

    /// Passthrough provider for a pre-issued token.
    pub fn with_static_token(token: impl Into<String>) -> Self {
        Self::with_source(TokenSource::Static(token.into()))
    }

    /// Provider backed by a client-credentials exchanger.
    pub fn with_exchanger(exchanger: Arc<dyn TokenExchanger>) -> Self {
        Self::with_source(TokenSource::Exchange(exchanger))
    }

    fn with_source(source: TokenSource) -> Self {
        let (header, _) = watch::channel(String::new());
        Self {
            source,
            state: Arc::new(RwLock::new(None)),
            header: Arc::new(header),
            refresh_task: Mutex::new(None),
        }
    }

    /// Subscribe to the live header value; every refresh is visible here.
    pub fn subscribe(&self) -> AccessTokenReceiver {
        self.header.subscribe()
    }

    /// Obtain the first token and, for client credentials, schedule refresh.
    ///
    /// A rejected exchange is returned as an authentication error; callers at
    /// startup treat it as fatal.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<String, ShopifyError> {
        let exchanger = match &self.source {
            TokenSource::Static(token) => {
                store_token(&self.state, &self.header, token.clone(), None);
                info!("Using static access token {}", mask_secret(token));
                return Ok(token.clone());
            }
            TokenSource::Exchange(exchanger) => exchanger.clone(),
        };

        let issued = exchanger.exchange().await?;
        let ttl = Duration::from_secs(issued.expires_in);
        store_token(
            &self.state,
            &self.header,
            issued.access_token.clone(),
            Some(Instant::now() + ttl),
        );
        info!(
            expires_in = issued.expires_in,
            scope = issued.scope.as_deref().unwrap_or(""),
            "Obtained access token {}",
            mask_secret(&issued.access_token)
        );

        self.schedule_refresh(exchanger, refresh_delay(ttl));
        Ok(issued.access_token)
    }

    /// Current token; fails before `initialize()`.
    pub fn get_access_token(&self) -> Result<String, ShopifyError> {
        self.state
            .read()
            .map_err(|_| ShopifyError::NotInitialized)?
            .as_ref()
            .map(|s| s.access_token.clone())
            .ok_or(ShopifyError::NotInitialized)
    }

    /// Expiry of the current token, if it expires.
    pub fn expires_at(&self) -> Option<Instant> {
        self.state
            .read()
            .ok()
            .and_then(|s| s.as_ref().and_then(|s| s.expires_at))
    }

    /// Whether a background refresh is scheduled.
    pub fn is_refresh_scheduled(&self) -> bool {
        self.refresh_task
            .lock()
            .map(|task| task.as_ref().is_some_and(|t| !t.is_finished()))
            .unwrap_or(false)
    }

    /// Cancel the background refresh.
    pub fn destroy(&self) {
        if let Ok(mut task) = self.refresh_task.lock()
            && let Some(handle) = task.take()
        {
            handle.abort();
            debug!("Token refresh cancelled");
        }
    }

    fn schedule_refresh(&self, exchanger: Arc<dyn TokenExchanger>, delay: Duration) {
        let state = self.state.clone();
        let header = self.header.clone();
        let handle = tokio::spawn(run_refresh_loop(exchanger, state, header, delay));

        if let Ok(mut task) = self.refresh_task.lock()
            && let Some(previous) = task.replace(handle)
        {
            previous.abort();
        }
    }
}

impl Drop for TokenProvider {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Delay until the proactive refresh for a token living `ttl`.
pub fn refresh_delay(ttl: Duration) -> Duration {
    ttl.saturating_sub(REFRESH_MARGIN)
}

fn store_token(
    state: &RwLock<Option<TokenState>>,
    header: &watch::Sender<String>,
    access_token: String,
    expires_at: Option<Instant>,
) {
    if let Ok(mut guard) = state.write() {
        *guard = Some(TokenState {
            access_token: access_token.clone(),
            expires_at,
        });
    }
    header.send_replace(access_token);
}

async fn run_refresh_loop(
    exchanger: Arc<dyn TokenExchanger>,
    state: Arc<RwLock<Option<TokenState>>>,
    header: Arc<watch::Sender<String>>,
    mut delay: Duration,
) {
    loop {
        debug!(delay_secs = delay.as_secs(), "Next token refresh scheduled");
        tokio::time::sleep(delay).await;

        match exchanger.exchange().await {
            Ok(issued) => {
                let ttl = Duration::from_secs(issued.expires_in);
                store_token(
                    &state,
                    &header,
                    issued.access_token.clone(),
                    Some(Instant::now() + ttl),
                );
                info!(
                    expires_in = issued.expires_in,
                    "Refreshed access token {}",
                    mask_secret(&issued.access_token)
                );
                delay = refresh_delay(ttl);
            }
            Err(e) => {
                error!(
                    "Token refresh failed: {}. Retrying in {}s",
                    e,
                    REFRESH_RETRY_DELAY.as_secs()
                );
                delay = REFRESH_RETRY_DELAY;
            }
        }
    }
}
