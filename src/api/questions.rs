use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::api::categories::category_map;
use crate::api::{json_i64, AppState};
use crate::domain::pagination::paginate;
use crate::domain::{NewQuestion, Question};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// Resolve the requested page, falling back to the first page when the
/// query string is absent or malformed (`?page=abc`).
pub(crate) fn page_or_first(page: Result<Query<PageQuery>, QueryRejection>) -> u32 {
    page.map(|Query(p)| p.page.unwrap_or(1)).unwrap_or(1)
}

#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: BTreeMap<String, String>,
    pub current_category: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub success: bool,
    pub created: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted: i64,
}

pub async fn list_questions(
    page: Result<Query<PageQuery>, QueryRejection>,
    State(state): State<AppState>,
) -> Result<Json<QuestionListResponse>, AppError> {
    let page = page_or_first(page);

    let all = state.repo.list_questions().await?;
    let page_items = paginate(&all, page);
    if page_items.is_empty() {
        return Err(AppError::NotFound);
    }

    let categories = state.repo.get_all_categories().await?;

    Ok(Json(QuestionListResponse {
        success: true,
        questions: page_items.to_vec(),
        total_questions: all.len(),
        categories: category_map(&categories),
        current_category: None,
    }))
}

/// POST /questions doubles as search and create, switched on the presence
/// of `searchTerm` in the body (the wire contract the web client expects).
pub async fn create_or_search(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body.map_err(|_| AppError::Unprocessable)?;

    if let Some(term) = body.get("searchTerm") {
        let term = term.as_str().ok_or(AppError::Unprocessable)?;
        let questions = state.repo.search_questions(term).await?;
        let total_questions = questions.len();
        return Ok(Json(SearchResponse {
            success: true,
            questions,
            total_questions,
        })
        .into_response());
    }

    let new_question = parse_new_question(&body)?;
    if !state.repo.category_exists(new_question.category).await? {
        return Err(AppError::Unprocessable);
    }

    let created = state
        .repo
        .insert_question(&new_question)
        .await
        .map_err(|_| AppError::Unprocessable)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            success: true,
            created,
        }),
    )
        .into_response())
}

pub async fn delete_question(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    if !state.repo.delete_question(id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(DeleteResponse {
        success: true,
        deleted: id,
    }))
}

fn parse_new_question(body: &Value) -> Result<NewQuestion, AppError> {
    let question = non_blank_str(body, "question")?;
    let answer = non_blank_str(body, "answer")?;
    let category = body
        .get("category")
        .and_then(json_i64)
        .ok_or(AppError::Unprocessable)?;
    let difficulty = body
        .get("difficulty")
        .and_then(json_i64)
        .ok_or(AppError::Unprocessable)?;

    Ok(NewQuestion {
        question,
        answer,
        category,
        difficulty,
    })
}

fn non_blank_str(body: &Value, field: &str) -> Result<String, AppError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(AppError::Unprocessable)
}
