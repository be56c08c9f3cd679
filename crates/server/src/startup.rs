use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file when present, env/defaults otherwise.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))
}

/// Router over a fresh in-memory catalog configured from `config.store`.
pub fn build_app(config: &AppConfig) -> Router {
    let state = AppState::in_memory(config.store.clone());
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only on process kill");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: build the app and serve it until Ctrl+C.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&config);

    // host may be a name, so let tokio resolve it
    let listener = TcpListener::bind(config.server.bind_addr())
        .await
        .map_err(StartupError::from)?;
    let addr = listener.local_addr()?;
    info!(
        %addr,
        validate_move_target = config.store.validate_move_target,
        shop_delete_policy = ?config.store.shop_delete_policy,
        "starting movie shop server"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
