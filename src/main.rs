use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use nocase_server::config::{AppState, Config};
use nocase_server::logger;
use nocase_server::server;

/// Case-insensitive static file server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Folder to serve (overrides the configured root)
    folder: Option<PathBuf>,

    /// Listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Disable the SPA index fallback
    #[arg(long)]
    no_spa: bool,

    /// Segment-resolution cache capacity (0 disables caching)
    #[arg(long, value_name = "N")]
    cache: Option<usize>,

    /// Render 404 responses as plain text instead of an HTML page
    #[arg(long = "plain-404")]
    plain_404: bool,

    /// Configuration file path, without extension
    #[arg(long, default_value = "config")]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = Config::load_from(&cli.config)?;

    // Command-line flags win over file and environment values
    if let Some(folder) = &cli.folder {
        cfg.serving.root = folder.display().to_string();
    }
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }
    if cli.no_spa {
        cfg.serving.spa_fallback = false;
    }
    if let Some(capacity) = cli.cache {
        cfg.cache.capacity = capacity;
    }
    if cli.plain_404 {
        cfg.serving.plain_404 = true;
    }

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.get_socket_addr()?;

    // The root is fixed and absolute for the life of the process; every
    // containment check is anchored to this canonical path.
    let root = tokio::fs::canonicalize(&config.serving.root)
        .await
        .map_err(|e| format!("Cannot open root directory '{}': {e}", config.serving.root))?;

    let listener = match server::create_listener(addr) {
        Ok(listener) => listener,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            eprintln!("Port {} already in use", addr.port());
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let state = Arc::new(AppState::new(config, root));
    logger::log_server_start(&addr, &state.root, &state.config);

    server::run(listener, state).await?;
    Ok(())
}
