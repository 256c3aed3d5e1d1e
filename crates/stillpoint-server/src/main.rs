//! `stillpoint` -- HTTP server binary for the Stillpoint meditation
//! backend.
//!
//! Wires the services together (store, synthesis backends, script
//! generator, orchestrator, status reporter) and serves the REST API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use stillpoint_core::{AudioOrchestrator, GenerationService, RitualStore, StatusReporter};
use stillpoint_llm::{OpenAiGenerator, ScriptGenerator};
use stillpoint_server::{ApiState, Config, build_router};
use stillpoint_tts::BackendRegistry;

/// Stillpoint meditation backend server.
#[derive(Parser)]
#[command(name = "stillpoint", about = "Stillpoint meditation backend", version)]
struct Cli {
    /// Bind address (overrides STILLPOINT_BIND).
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Storage root directory (overrides STILLPOINT_STORAGE).
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let mut config = Config::from_env();
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(storage) = cli.storage {
        config.storage_dir = storage;
    }

    let store = Arc::new(RitualStore::new(&config.storage_dir));
    let backends = Arc::new(BackendRegistry::from_env());
    let generator: Arc<dyn ScriptGenerator> = Arc::new(OpenAiGenerator::from_env());

    let state = ApiState {
        store: Arc::clone(&store),
        backends: Arc::clone(&backends),
        orchestrator: Arc::new(AudioOrchestrator::new(Arc::clone(&store), Arc::clone(&backends))),
        reporter: Arc::new(StatusReporter::new(Arc::clone(&store))),
        generation: Arc::new(GenerationService::new(Arc::clone(&store), generator)),
    };

    // The static file service needs the directory to exist up front.
    let audio_dir = store.audio_root();
    tokio::fs::create_dir_all(&audio_dir).await?;

    let router = build_router(state, &config.cors_origins, audio_dir);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(
        addr = %config.bind,
        storage = %config.storage_dir.display(),
        "stillpoint listening"
    );
    axum::serve(listener, router).await?;

    Ok(())
}
