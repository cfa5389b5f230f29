//! Webhook HTTP server

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::bot::{handle_card_action, handle_chat_request, RenderMode};
use crate::card::ChatResponse;
use crate::chat_event::ChatRequest;
use crate::errors::AppError;
use crate::store::TaskStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
    pub render_mode: RenderMode,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>, render_mode: RenderMode) -> Self {
        Self { store, render_mode }
    }
}

/// Build the router with all webhook routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/card-action", post(card_action_handler))
        .route("/health", get(health_check_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `listen_addr` and serve until the process stops
#[tracing::instrument(skip(state))]
pub async fn start_web_server(listen_addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!("Web server running on http://{}", listen_addr);

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let response = handle_chat_request(state.store.as_ref(), &request, state.render_mode).await?;
    Ok(Json(response))
}

pub async fn card_action_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let response = handle_card_action(state.store.as_ref(), &request, state.render_mode).await?;
    Ok(Json(response))
}

pub async fn health_check_handler() -> &'static str {
    "OK"
}
