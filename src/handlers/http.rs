//! Shared state plus the welcome and health routes.

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::db::DbPool;
use crate::models::MessageResponse;

/// Shared application state, injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
}

impl AppState {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DbPool {
        &self.db
    }
}

/// GET / — static welcome message.
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the blog API"))
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "blog-api" })),
    )
}
