use anyhow::Context;
use clap::Parser;
use gestion_server::api::build_app;
use gestion_server::core::{DefaultStorageConfig, StorageConfig};
use gestion_server::state::AppState;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    bind: IpAddr,

    #[arg(short, long, env = "DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory containing static frontend files (for production)
    #[arg(long, env = "STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Base URL of the business API, overrides the stored one
    #[arg(long, env = "API_BASE_URL")]
    api_base_url: Option<String>,

    /// Key required by /api/config and /api/logs, sent as X-Admin-Key
    #[arg(long, env = "ADMIN_KEY", hide_env_values = true)]
    admin_key: Option<String>,

    /// Also write daily rolling logs under <data_dir>/logs
    #[arg(long, env = "LOG_TO_FILE")]
    log_to_file: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let storage = match &args.data_dir {
        Some(dir) => DefaultStorageConfig::with_path(dir.clone()),
        None => DefaultStorageConfig::new(),
    }
    .map_err(anyhow::Error::msg)
    .context("Failed to init data dir")?;

    // el guard mantiene vivo el hilo que escribe el archivo
    let (file_layer, _file_guard) = if args.log_to_file {
        let appender = tracing_appender::rolling::daily(storage.logs_dir(), "gestion-server.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    tracing::info!("Data dir: {:?}", storage.data_dir());

    let state = AppState::new(storage, args.api_base_url.clone(), args.admin_key.clone())
        .await
        .map_err(anyhow::Error::msg)
        .context("Failed to init state")?;

    let app = build_app(Arc::new(state), args.static_dir.as_deref());

    let addr = SocketAddr::new(args.bind, args.port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
