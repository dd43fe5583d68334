use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guesswork_core::{
    load_config, validate_config, ChatCompletionsClient, FeedbackOracle, HttpOracle, LlmClient,
    LlmSuggester, Suggester,
};
use guesswork_server::{api::create_router, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    let json_logs = std::env::var("GUESSWORK_LOG_FORMAT").is_ok_and(|f| f == "json");
    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Determine config path
    let config_path = std::env::var("GUESSWORK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!(
        "Oracle: {} (word size {})",
        config.oracle.base_url, config.oracle.word_size
    );

    // Create feedback oracle
    let oracle: Arc<dyn FeedbackOracle> = Arc::new(
        HttpOracle::new(config.oracle.clone()).context("Failed to create oracle client")?,
    );

    // Create suggestion service if enabled
    let suggester: Option<Arc<dyn Suggester>> = if config.suggestion.enabled {
        match ChatCompletionsClient::from_config(&config.suggestion) {
            Ok(client) => {
                info!(
                    "Suggestions via {} ({})",
                    client.provider(),
                    client.model()
                );
                if config.suggestion.provider.requires_api_key()
                    && config.suggestion.api_key.is_none()
                {
                    warn!("No suggestion API key configured, every round will use the emergency generator");
                }
                let llm: Arc<dyn LlmClient> = Arc::new(client);
                Some(Arc::new(LlmSuggester::new(llm, config.suggestion.clone())))
            }
            Err(e) => {
                error!("Failed to create suggestion client: {}", e);
                None
            }
        }
    } else {
        info!("Suggestions disabled in config");
        None
    };

    // Create app state
    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, oracle, suggester));

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
