use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kondate_core::provider::{RecipeProvider, SpoonacularClient};
use kondate_core::translator::{DeepLClient, Translator};
use kondate_core::{load_config, validate_config, QuotaGovernor, RecommendationEngine};

use kondate_server::api::create_router;
use kondate_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting kondate v{}", VERSION);

    // Determine config path
    let config_path = std::env::var("KONDATE_CONFIG")
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
        "Budgets: {} searches/day, {} translation chars/month",
        config.quota.search_daily_limit, config.quota.translation_monthly_limit
    );

    // Quota governor tracks both metered budgets
    let quota = Arc::new(QuotaGovernor::new(
        config.quota.search_daily_limit,
        config.quota.translation_monthly_limit,
    ));

    // Recipe provider
    let provider: Arc<dyn RecipeProvider> =
        Arc::new(SpoonacularClient::new(config.provider.clone()));
    info!("Using recipe provider: {}", provider.name());

    // Translator is optional; without one, localization degrades to the
    // built-in dictionary and never spends translation budget
    let translator: Option<Arc<dyn Translator>> = match &config.translator {
        Some(translator_config) => match DeepLClient::new(translator_config) {
            Ok(client) => {
                info!("Using translator: {}", client.name());
                Some(Arc::new(client))
            }
            Err(e) => {
                error!("Failed to initialize translator: {}", e);
                None
            }
        },
        None => {
            info!("No translator configured, using dictionary-only localization");
            None
        }
    };

    // Create recommendation engine
    let engine = Arc::new(RecommendationEngine::new(
        provider,
        translator,
        Arc::clone(&quota),
        &config,
    ));
    info!("Recommendation engine initialized");

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), engine, quota));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
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
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
