use axum::{routing::get, Router};

use crate::server::state::AppState;

pub const LIVENESS_MESSAGE: &str = "Ticket desk bot is online.";

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(liveness))
}

/// Liveness check for uptime monitors.
async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}
