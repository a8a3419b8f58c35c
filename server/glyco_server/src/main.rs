use clap::Parser;
use glyco_ai::{ArtifactStore, LoadError};
use glyco_server::config::{init_logging, Cli};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("failed to load artifacts: {0}")]
    Artifacts(#[from] LoadError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    // The store is complete before the listener exists, so no request can see
    // partially loaded state.
    let store = Arc::new(ArtifactStore::initialize(&cli.artifact_paths())?);
    let app = glyco_server::router(store);

    let addr = cli.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    log::info!("glyco_server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("cannot listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}
