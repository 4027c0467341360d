use std::sync::Arc;

use khronos_concierge::{config::Config, logging, routes, state::AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    logging::init_tracing();

    if config.api_key.is_none() {
        warn!("no GEMINI_API_KEY set, assistant will answer in offline mode");
    }

    let state = Arc::new(AppState::from_config(&config));

    let app = routes::create_router(&config.static_dir).with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    info!(addr = %config.bind_addr, model = %config.model, "KHRONOS concierge running");
    axum::serve(listener, app).await?;
    Ok(())
}
