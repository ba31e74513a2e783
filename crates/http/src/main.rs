use std::process::ExitCode;
use std::sync::Arc;

use modelize_http::{init_logging, AppConfig, AppConfigTrait, AppState, HttpError, Server};
use modelize_orm::MemoryAdapter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::from_env().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), HttpError> {
    let state = AppState::new(Arc::new(MemoryAdapter::new()))?;
    let server = Server::new(&config, state)?;
    tracing::info!(app = %config.name, addr = %server.addr(), "starting");
    server.run().await
}
