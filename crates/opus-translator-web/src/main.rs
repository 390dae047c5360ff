//! Opus Translator Web - HTTP API for detecting and translating text.

mod app;
mod routes;
mod state;

use anyhow::{Context, Result, bail};
use clap::Parser;
use opus_translator_core::{AppConfig, BackendKind};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "opus-translator-web")]
#[command(author, version, about = "Opus Translator API Server", long_about = None)]
struct Args {
    /// Config file path (defaults to ~/.config/opus-translator/config.toml or ./config.toml)
    #[arg(short, long, env = "OPUS_TRANSLATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to bind to
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Inference backend: "huggingface" or "openai"
    #[arg(long, env = "TRANSLATOR_BACKEND")]
    backend: Option<String>,

    /// Inference API base URL
    #[arg(long, env = "TRANSLATOR_API_BASE")]
    api_base: Option<String>,

    /// Inference API key (Hugging Face token or OpenAI key)
    #[arg(long, env = "TRANSLATOR_API_KEY")]
    api_key: Option<String>,

    /// Chat model name for the OpenAI-compatible backend
    #[arg(long, env = "OPENAI_MODEL")]
    model: Option<String>,

    /// Skip the model hub lookup when resolving a language pair
    #[arg(long)]
    no_verify_models: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Override file configuration with command line values
    fn apply(self, config: &mut AppConfig) -> Result<()> {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(name) = self.backend {
            let Some(kind) = BackendKind::from_name(&name) else {
                bail!("Unknown backend '{name}' (expected huggingface or openai)");
            };
            config.backend.kind = kind;
        }
        if let Some(api_base) = self.api_base {
            config.backend.api_base = api_base;
        }
        if self.api_key.is_some() {
            config.backend.api_key = self.api_key;
        }
        if let Some(model) = self.model {
            config.backend.model = model;
        }
        if self.no_verify_models {
            config.backend.verify_models = false;
        }
        config.validate().context("Invalid configuration")?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},hyper_util=warn")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let mut config = if let Some(path) = &args.config {
        AppConfig::from_file(path).context("Failed to load config file")?
    } else {
        AppConfig::load()
    };
    args.apply(&mut config)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid listen address")?;

    let state = Arc::new(AppState::new(config).context("Failed to initialize application state")?);
    info!(
        "Using {} backend at {}",
        state.service.provider_name(),
        state.config.backend.api_base
    );

    let app = app::build_router(Arc::clone(&state))?;

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
