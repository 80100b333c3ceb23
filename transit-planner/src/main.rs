use std::net::SocketAddr;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_planner::loading::load_json;
use transit_planner::reduce::RosterConfig;
use transit_planner::web::{AppState, create_router};

/// Default listen address when `PLANNER_ADDR` is unset.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let addr: SocketAddr = match std::env::var("PLANNER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
    {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "invalid PLANNER_ADDR");
            std::process::exit(2);
        }
    };

    // Optional roster configuration (fail fast if given but unreadable)
    let roster_config = match std::env::var("PLANNER_ROSTER_CONFIG") {
        Ok(path) => match load_json::<RosterConfig>(&path) {
            Ok(config) => {
                info!(%path, "loaded roster configuration");
                config
            }
            Err(e) => {
                error!(%path, error = %e, "failed to load roster configuration");
                std::process::exit(2);
            }
        },
        Err(_) => RosterConfig::default(),
    };

    let state = AppState::new(roster_config);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(%addr, "transit planner listening");
    info!("  GET  /health     - Health check");
    info!("  POST /transfers  - Worst-case transfers between terminals");
    info!("  POST /crew       - Driver and guard roster");
    info!("  POST /trains     - Minimum train count");
    info!("  POST /capacity   - Network throughput");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}
