use std::process::ExitCode;

use agri_catalog::{api, AsyncCatalog, Result, ServerConfig};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
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
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown signal received");
}

async fn run(config: ServerConfig) -> Result<()> {
    let catalog = AsyncCatalog::builder()
        .location(config.database.clone())
        .build()
        .await?;
    let count = catalog.count().await?;
    info!(database = %config.database, products = count, "connected to catalog database");

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("server listening at http://{addr}");

    axum::serve(listener, api::build_router(catalog.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    catalog.close().await
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::from_env();
    init_tracing(config.as_ref().map(|c| c.log_json).unwrap_or(false));

    let result = match config {
        Ok(config) => run(config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "agri-catalog stopped");
            ExitCode::FAILURE
        }
    }
}
