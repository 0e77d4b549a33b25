//! Configuration management for the MCP server.
//!
//! Settings are resolved once at startup with the precedence
//! command-line flag > environment variable (including a local `.env`) >
//! built-in default, then frozen into an immutable [`Config`] that every
//! other component reads.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use super::error::{Error, Result};
use super::security::mask_secret;

/// Default Shopify Admin API version.
pub const DEFAULT_API_VERSION: &str = "2026-01";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default number of retries for read operations.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default active tool package.
pub const DEFAULT_TOOL_PACKAGE: &str = "full";

/// Command-line arguments.
///
/// Every flag also reads an environment variable, so clap enforces the
/// flag > env > default precedence.
#[derive(Clone, Parser)]
#[command(name = "shopify-mcp-server", version, about = "MCP server for the Shopify Admin API")]
pub struct Cli {
    /// Static Admin API access token.
    #[arg(long = "accessToken", env = "SHOPIFY_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// OAuth client id (client-credentials flow).
    #[arg(long = "clientId", env = "SHOPIFY_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret (client-credentials flow).
    #[arg(long = "clientSecret", env = "SHOPIFY_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Store domain, e.g. `my-store.myshopify.com`.
    #[arg(long = "domain", env = "MYSHOPIFY_DOMAIN")]
    pub domain: Option<String>,

    /// Admin API version.
    #[arg(long = "apiVersion", env = "SHOPIFY_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Per-request timeout in milliseconds.
    #[arg(long = "timeout", env = "TIMEOUT", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Retry attempts for read operations.
    #[arg(long = "retryAttempts", env = "RETRY_ATTEMPTS", default_value_t = DEFAULT_RETRY_ATTEMPTS)]
    pub retry_attempts: u32,

    /// Tool package to activate.
    #[arg(long = "toolPackage", env = "MCP_TOOL_PACKAGE", default_value = DEFAULT_TOOL_PACKAGE)]
    pub tool_package: String,

    /// Optional JSON file with tool package definitions.
    #[arg(
        long = "toolPackagesFile",
        env = "MCP_TOOL_PACKAGES_FILE",
        default_value = "tool-packages.json"
    )]
    pub tool_packages_file: PathBuf,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR).
    #[arg(long = "logLevel", env = "LOG_LEVEL", default_value = "INFO")]
    pub log_level: String,

    /// Server name reported to MCP clients.
    #[arg(long = "serverName", env = "MCP_SERVER_NAME", default_value = "shopify-mcp-server")]
    pub server_name: String,
}

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Shopify store connection settings.
    pub shopify: ShopifyConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Tool package selection.
    pub tools: ToolsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Shopify store connection settings.
#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    /// Store domain without scheme, e.g. `my-store.myshopify.com`.
    pub domain: String,

    /// Admin API version, e.g. `2026-01`.
    pub api_version: String,

    /// The single credential active for this process.
    pub credential: Credential,

    /// Timeout applied to every outbound request.
    pub timeout: Duration,

    /// Retries for read operations (total attempts = retries + 1).
    pub retry_attempts: u32,
}

/// Credential material for the Admin API.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// A pre-issued Admin API access token.
    AccessToken(String),

    /// App credentials exchanged for short-lived tokens.
    ClientCredentials {
        client_id: String,
        client_secret: String,
    },
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "INFO", "debug").
    pub level: String,
}

/// Tool package selection.
#[derive(Debug, Clone)]
pub struct ToolsConfig {
    /// Name of the package whose tools are exposed.
    pub package: String,

    /// Optional external package definition file.
    pub packages_file: Option<PathBuf>,
}

/// Custom Debug implementation to mask secrets in logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessToken(token) => f
                .debug_tuple("AccessToken")
                .field(&mask_secret(token))
                .finish(),
            Self::ClientCredentials {
                client_id,
                client_secret,
            } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .field("client_secret", &mask_secret(client_secret))
                .finish(),
        }
    }
}

impl Credential {
    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccessToken(_) => "static access token",
            Self::ClientCredentials { .. } => "client credentials",
        }
    }
}

impl ShopifyConfig {
    /// GraphQL endpoint of the Admin API.
    pub fn graphql_endpoint(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.domain, self.api_version
        )
    }

    /// OAuth token endpoint used by the client-credentials exchange.
    pub fn token_endpoint(&self) -> String {
        format!("https://{}/admin/oauth/access_token", self.domain)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "shopify-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_TOOL_PACKAGE.to_string(),
            packages_file: None,
        }
    }
}

impl Config {
    /// Create a configuration for the given store, with defaults elsewhere.
    pub fn new(shopify: ShopifyConfig) -> Self {
        Self {
            server: ServerConfig::default(),
            shopify,
            logging: LoggingConfig::default(),
            tools: ToolsConfig::default(),
        }
    }

    /// Load configuration from the process arguments and environment.
    ///
    /// A `.env` file in the working directory is read first; it never
    /// overrides variables that are already set.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_args(Cli::parse())
    }

    /// Validate parsed arguments into the immutable settings record.
    pub fn from_args(cli: Cli) -> Result<Self> {
        let credential = resolve_credential(
            non_empty(cli.access_token),
            non_empty(cli.client_id),
            non_empty(cli.client_secret),
        )?;

        let domain = non_empty(cli.domain)
            .map(|d| normalize_domain(&d))
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                Error::config(
                    "Missing store domain. Set --domain <store>.myshopify.com \
                     (or the MYSHOPIFY_DOMAIN environment variable).",
                )
            })?;

        if cli.timeout_ms == 0 {
            return Err(Error::config("--timeout must be greater than zero"));
        }

        let api_version = non_empty(Some(cli.api_version))
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(Self {
            server: ServerConfig {
                name: cli.server_name,
                ..ServerConfig::default()
            },
            shopify: ShopifyConfig {
                domain,
                api_version,
                credential,
                timeout: Duration::from_millis(cli.timeout_ms),
                retry_attempts: cli.retry_attempts,
            },
            logging: LoggingConfig {
                level: cli.log_level,
            },
            tools: ToolsConfig {
                package: cli.tool_package,
                packages_file: Some(cli.tool_packages_file),
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Strip scheme and trailing slashes from a store domain.
fn normalize_domain(domain: &str) -> String {
    domain
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string()
}

fn resolve_credential(
    access_token: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
) -> Result<Credential> {
    if let Some(token) = access_token {
        return Ok(Credential::AccessToken(token));
    }

    match (client_id, client_secret) {
        (Some(client_id), Some(client_secret)) => Ok(Credential::ClientCredentials {
            client_id,
            client_secret,
        }),
        _ => Err(Error::config(
            "Missing Shopify credentials. Provide either:\n  \
             --accessToken <token> (or SHOPIFY_ACCESS_TOKEN)\n\
             or both:\n  \
             --clientId <id> and --clientSecret <secret> \
             (or SHOPIFY_CLIENT_ID and SHOPIFY_CLIENT_SECRET)",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: &[&str] = &[
        "SHOPIFY_ACCESS_TOKEN",
        "SHOPIFY_CLIENT_ID",
        "SHOPIFY_CLIENT_SECRET",
        "MYSHOPIFY_DOMAIN",
        "SHOPIFY_API_VERSION",
        "TIMEOUT",
        "RETRY_ATTEMPTS",
        "MCP_TOOL_PACKAGE",
        "MCP_TOOL_PACKAGES_FILE",
        "MCP_SERVER_NAME",
        "LOG_LEVEL",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    fn parse(args: &[&str]) -> Result<Config> {
        let mut argv = vec!["shopify-mcp-server"];
        argv.extend_from_slice(args);
        Config::from_args(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_defaults_with_static_token() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();

        let config = parse(&["--accessToken", "shpat_token", "--domain", "demo.myshopify.com"])
            .unwrap();

        assert_eq!(config.shopify.api_version, "2026-01");
        assert_eq!(config.shopify.timeout, Duration::from_millis(30_000));
        assert_eq!(config.shopify.retry_attempts, 3);
        assert_eq!(config.tools.package, "full");
        assert_eq!(
            config.tools.packages_file,
            Some(PathBuf::from("tool-packages.json"))
        );
        assert_eq!(config.server.name, "shopify-mcp-server");
        assert_eq!(config.logging.level, "INFO");
        assert_eq!(
            config.shopify.credential,
            Credential::AccessToken("shpat_token".to_string())
        );
    }

    #[test]
    fn test_client_credentials() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();

        let config = parse(&[
            "--clientId",
            "id-1",
            "--clientSecret",
            "secret-1",
            "--domain",
            "demo.myshopify.com",
        ])
        .unwrap();

        assert!(matches!(
            config.shopify.credential,
            Credential::ClientCredentials { .. }
        ));
    }

    #[test]
    fn test_missing_credentials_is_config_error() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();

        let err = parse(&["--domain", "demo.myshopify.com", "--clientId", "id-only"])
            .unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, Error::Config(_)));
        assert!(message.contains("SHOPIFY_ACCESS_TOKEN"));
        assert!(message.contains("SHOPIFY_CLIENT_SECRET"));
    }

    #[test]
    fn test_missing_domain_is_config_error() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();

        let err = parse(&["--accessToken", "shpat_token"]).unwrap_err();
        assert!(err.to_string().contains("MYSHOPIFY_DOMAIN"));
    }

    #[test]
    fn test_flag_overrides_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MYSHOPIFY_DOMAIN", "env.myshopify.com");
            std::env::set_var("SHOPIFY_ACCESS_TOKEN", "env_token");
            std::env::set_var("RETRY_ATTEMPTS", "7");
        }

        let config = parse(&["--domain", "flag.myshopify.com"]).unwrap();
        clear_env();

        assert_eq!(config.shopify.domain, "flag.myshopify.com");
        assert_eq!(config.shopify.retry_attempts, 7);
        assert_eq!(
            config.shopify.credential,
            Credential::AccessToken("env_token".to_string())
        );
    }

    #[test]
    fn test_domain_normalized_and_endpoints() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();

        let config = parse(&[
            "--accessToken",
            "shpat_token",
            "--domain",
            "https://demo.myshopify.com/",
            "--apiVersion",
            "2025-10",
        ])
        .unwrap();

        assert_eq!(
            config.shopify.graphql_endpoint(),
            "https://demo.myshopify.com/admin/api/2025-10/graphql.json"
        );
        assert_eq!(
            config.shopify.token_endpoint(),
            "https://demo.myshopify.com/admin/oauth/access_token"
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();

        let err = parse(&[
            "--accessToken",
            "shpat_token",
            "--domain",
            "demo.myshopify.com",
            "--timeout",
            "0",
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_credentials_masked_in_debug() {
        let creds = Credential::ClientCredentials {
            client_id: "app-id".to_string(),
            client_secret: "super_secret_value".to_string(),
        };
        let debug_str = format!("{:?}", creds);
        assert!(!debug_str.contains("super_secret_value"));
        assert!(debug_str.contains("supe"));
    }
}
