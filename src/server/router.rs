use axum::{routing::get, Router};

pub const LIVENESS_BODY: &str = "Bot is ALIVE!";

/// Liveness endpoint polled by the hosting platform's uptime probe.
pub fn router() -> Router {
    Router::new().route("/", get(health_check))
}

async fn health_check() -> &'static str {
    LIVENESS_BODY
}
