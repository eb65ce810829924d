use log::{error, info};
use service::{config::Config, logging::Logger, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
        std::process::exit(1);
    }

    info!("Starting up invite_platform_rs [{}]...", config.runtime_env());

    let signer = match service::init_signer(&config) {
        Ok(signer) => Arc::new(signer),
        Err(e) => {
            error!("Failed to initialize the invitation signer: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config, &signer);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server stopped: {e}");
        std::process::exit(1);
    }
}
