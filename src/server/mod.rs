pub mod error;
pub mod handlers;

use crate::service::CryptoAnalyst;
use axum::Router;
use axum::routing::post;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyst: Arc<CryptoAnalyst>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/crypto/analysis", post(handlers::analyze_crypto))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
