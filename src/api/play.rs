use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::api::{json_i64, AppState};
use crate::domain::{quiz, Question};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub success: bool,
    /// None once the chosen category is exhausted; the client ends the round.
    pub question: Option<Question>,
}

/// POST /play serves one random question not yet seen this round.
///
/// Body: `{previous_questions: [ids], quiz_category: {id, type}}`.
/// A category id of 0 plays across all categories.
pub async fn play(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PlayResponse>, AppError> {
    let Json(body) = body.map_err(|_| AppError::Unprocessable)?;

    let previous = body
        .get("previous_questions")
        .and_then(Value::as_array)
        .ok_or(AppError::Unprocessable)?;
    let previous: Vec<i64> = previous
        .iter()
        .map(json_i64)
        .collect::<Option<Vec<_>>>()
        .ok_or(AppError::Unprocessable)?;

    let category = body
        .get("quiz_category")
        .and_then(|c| c.get("id"))
        .and_then(json_i64)
        .ok_or(AppError::Unprocessable)?;
    let category = if category == 0 { None } else { Some(category) };

    let candidates = state.repo.quiz_candidates(category, &previous).await?;
    let question = quiz::pick_random(&candidates, &mut rand::rng()).cloned();

    Ok(Json(PlayResponse {
        success: true,
        question,
    }))
}
