//! NER API Server
//!
//! HTTP server returning named entities detected in form-posted text.
//!
//! Author: hephaex@gmail.com

use clap::Parser;
use ner_api::{create_router, state::AppState};
use ner_core::config::{AppConfig, LoggingConfig};
use ner_tagger::load_tagger;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ner-api")]
#[command(about = "Named entity recognition HTTP server")]
#[command(version)]
struct Cli {
    /// TOML configuration file (defaults to $NER_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tagger model file, overriding config and $MODEL_PATH
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.level.as_str().into());

    if logging.json_format {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load(cli.config)?;
    if let Some(path) = cli.model_path {
        config.model.path = path;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // Initialize tracing
    init_tracing(&config.logging);

    // Select the tagger once; anything but a missing file aborts startup
    let loaded = load_tagger(&config.model.path)?;
    tracing::info!("Active tagger: {}", loaded.source.kind());

    let addr = config.server.bind_address();

    // Create application state
    let state = Arc::new(AppState::new(config, loaded));

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("NER API Server starting on http://{}", addr);
    tracing::info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
