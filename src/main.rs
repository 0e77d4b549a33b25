//! MCP Server Entry Point
//!
//! Loads configuration, authenticates against the store, verifies
//! connectivity, then serves the active tool package over stdio until the
//! client disconnects or the process is interrupted.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use shopify_mcp_server::core::shopify::{ShopifyClient, TokenProvider};
use shopify_mcp_server::core::{Config, McpServer, TransportService};
use shopify_mcp_server::domains::tools::{ToolContext, ToolPackageRegistry};

#[tokio::main]
async fn main() -> ExitCode {
    // Logging is not up yet; configuration errors go straight to stderr.
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging.level);
    install_panic_hook();

    match run(config).await {
        Ok(()) => {
            info!("Server shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<()> {
    info!(
        domain = %config.shopify.domain,
        api_version = %config.shopify.api_version,
        "Starting {} v{} ({})",
        config.server.name,
        config.server.version,
        config.shopify.credential.kind()
    );
    let config = Arc::new(config);

    let provider = TokenProvider::from_config(&config.shopify)?;
    provider
        .initialize()
        .await
        .context("Failed to obtain a Shopify access token")?;

    let client = ShopifyClient::from_config(&config.shopify, provider.subscribe())?;
    if !client.health_check().await {
        provider.destroy();
        bail!(
            "Could not reach the Shopify Admin API at {}",
            client.endpoint()
        );
    }

    let packages = ToolPackageRegistry::from_config(&config);
    for package in packages.list() {
        info!(
            tools = package.tools.len(),
            "Tool package '{}': {}", package.name, package.description
        );
    }
    let tools = packages.get_active_tools()?;
    info!(
        "Activating tool package '{}' ({} tools)",
        packages.active_name(),
        tools.len()
    );

    let server = McpServer::new(ToolContext::new(config, client), &tools);
    info!("Server initialized");

    let result = TransportService::new().run_until_shutdown(server).await;
    provider.destroy();
    result?;

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries protocol messages only.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Route panic reports through tracing so they land in the same log stream.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic| {
        let location = panic
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        let message = panic
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        error!(location = %location, "Panic: {}", message);
    }));
}
