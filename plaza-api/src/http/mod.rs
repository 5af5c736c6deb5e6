// Module: http
// HTTP/JSON surface for the real-time core: the broadcast channel's
// WebSocket endpoint and the live status query.

pub mod error;
pub mod health;
pub mod live;
pub mod websocket;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use plaza_core::service::{ChannelHub, ChatService, LiveStatusService};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub live_service: Arc<LiveStatusService>,
    pub hub: Arc<ChannelHub>,
}

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/api/live", get(live::get_live_streams))
        .route("/api/chat/ws", get(websocket::websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
