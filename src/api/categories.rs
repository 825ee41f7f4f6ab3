use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::api::questions::{page_or_first, PageQuery};
use crate::api::AppState;
use crate::domain::pagination::paginate;
use crate::domain::{Category, Question};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub success: bool,
    pub categories: BTreeMap<String, String>,
    pub total_categories: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: i64,
}

/// Categories serialize on the wire as an id -> type map with string keys.
pub(crate) fn category_map(categories: &[Category]) -> BTreeMap<String, String> {
    categories
        .iter()
        .map(|c| (c.id.to_string(), c.kind.clone()))
        .collect()
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoryListResponse>, AppError> {
    let categories = state.repo.get_all_categories().await?;
    let total_categories = categories.len();

    Ok(Json(CategoryListResponse {
        success: true,
        categories: category_map(&categories),
        total_categories,
    }))
}

pub async fn questions_by_category(
    Path(id): Path<i64>,
    page: Result<Query<PageQuery>, QueryRejection>,
    State(state): State<AppState>,
) -> Result<Json<CategoryQuestionsResponse>, AppError> {
    let all = state.repo.questions_by_category(id).await?;
    // A category with no questions reports 404, same as an unknown id.
    if all.is_empty() {
        return Err(AppError::NotFound);
    }

    let page_items = paginate(&all, page_or_first(page));
    if page_items.is_empty() {
        return Err(AppError::NotFound);
    }

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: page_items.to_vec(),
        total_questions: all.len(),
        current_category: id,
    }))
}
