//! Tradepost server - e-commerce backend API.
//!
//! Serves the full HTTP surface from one binary:
//!
//! - `/admin/*`, `/user/*` - signup and login for the two principal roles
//! - `/products*` - catalog CRUD, administrator credential required
//! - `/cart*` - per-customer cart, customer credential required
//! - `/orders*` - order snapshots, customer credential required
//! - `/order-status/{id}` - status changes, administrator credential required

#![cfg_attr(not(test), forbid(unsafe_code))]

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tradepost_server::config::ServerConfig;
use tradepost_server::state::AppState;
use tradepost_server::{db, routes};

#[tokio::main]
async fn main() {
    // .env is optional; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tradepost_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p tradepost-cli -- migrate

    let addr = config.socket_addr();
    let state = AppState::new(&config, pool);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app).await.expect("Server error");
}
