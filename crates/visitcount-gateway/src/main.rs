//! visitcount gateway binary.
//!
//! - `/count`: daily-deduplicated visit counter (JSON, CORS)
//! - Config: `VISITCOUNT_CONFIG` YAML file, then `ALLOWED_ORIGINS` / `START_AT` / `LISTEN`
//! - In-memory store with a background TTL sweeper

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use visitcount_core::clock::SystemClock;
use visitcount_core::store::{spawn_sweeper, MemoryStore};
use visitcount_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load().expect("config load failed");
    let listen = cfg.server.listen_addr().expect("server.listen must be a valid SocketAddr");

    let store = Arc::new(MemoryStore::new());
    let _sweeper = spawn_sweeper(Arc::clone(&store), Duration::from_secs(cfg.server.sweep_interval_secs));

    tracing::info!(
        %listen,
        start_at = cfg.counter.start_at,
        allowed_origins = cfg.counter.compile_origins().origins().len(),
        "visitcount-gateway starting"
    );

    let state = app_state::AppState::new(cfg, store, Arc::new(SystemClock));
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
