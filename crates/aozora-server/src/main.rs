use tracing_subscriber::EnvFilter;

use aozora_server::{run_server, AppState, ServerConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_env_filter(filter)
        .init();

    let config = ServerConfig::from_env();
    let state = AppState::new(config);

    if let Err(e) = run_server(state).await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}
