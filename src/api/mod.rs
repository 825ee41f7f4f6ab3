pub mod categories;
pub mod health;
pub mod play;
pub mod questions;

use crate::db::Repository;
use axum::routing::{delete, get, post};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route(
            "/questions",
            get(questions::list_questions).post(questions::create_or_search),
        )
        .route("/questions/:id", delete(questions::delete_question))
        .route("/categories", get(categories::list_categories))
        .route(
            "/categories/:id/questions",
            get(categories::questions_by_category),
        )
        .route("/play", post(play::play))
        .layer(cors)
        .with_state(state)
}

/// Read an integer from a JSON value that clients send either as a number
/// or as a numeric string.
pub(crate) fn json_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
