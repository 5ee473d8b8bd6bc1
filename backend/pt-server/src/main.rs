use pt_config::Config;
use pt_server::{App, AppState, ServerError, ServerResult, build_router, logger, shutdown_signal};
use pt_store::FilePatientRepository;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration; both failures are fatal
    let config_path = Config::config_path();
    let config = Config::load(&config_path).map_err(ServerError::from)?;
    config.validate().map_err(ServerError::from)?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.effective_log_level(),
        config.logging.file.as_ref().map(PathBuf::from),
        config.logging.colored,
    )?;

    info!("Starting pt-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Read configuration from {}", config_path.display());
    config.log_summary();

    run(&config).await?;

    info!("Application stopped");
    Ok(())
}

async fn run(config: &Config) -> ServerResult<()> {
    let repository = FilePatientRepository::open(config.storage.path()).await?;
    info!("Patient data file: {}", repository.path().display());

    let state = AppState::new(Arc::new(repository), config.handler.timeout());
    let router = build_router(state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: bind_addr.clone(),
            source,
        })?;

    let app = App::new(listener, router, config.shutdown_grace());
    info!("Server listening on {}", app.local_addr()?);

    app.run_until(shutdown_signal()).await
}
