//! Startup orchestration shared by both binaries.
//!
//! Any startup error is fatal. The store pool is lazy, so the listener comes
//! up even while MySQL is still starting.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tokio::net::TcpListener;

use crate::config::{load_config, ServiceConfig};
use crate::http::{AppState, HttpServer, ServiceKind};
use crate::lifecycle::Shutdown;
use crate::observability::init_logging;
use crate::store::MySqlStore;

#[derive(Debug, Args)]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listen address, overriding the config file and BIND_ADDRESS
    #[arg(short, long)]
    pub bind: Option<String>,
}

/// Run `kind` until a termination signal arrives.
pub async fn run(kind: ServiceKind, args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let defaults = match kind {
        ServiceKind::Reader => ServiceConfig::reader(),
        ServiceKind::Writer => ServiceConfig::writer(),
    };
    let mut config = load_config(args.config.as_deref(), defaults)?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!(
        service = kind.name(),
        version = env!("CARGO_PKG_VERSION"),
        pod_name = %config.pod_name,
        "data-app starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = ?config.database,
        retries = ?config.retries,
        "Configuration loaded"
    );

    let store = Arc::new(MySqlStore::connect_lazy(&config.database));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(kind, AppState::new(store.clone(), config));
    server.run(listener, shutdown.subscribe()).await?;

    store.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}
