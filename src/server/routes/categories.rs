use std::collections::BTreeMap;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::{
    db::{Question, Store},
    server::app::AppState,
    trivia::category_map,
};

use super::{ApiError, ApiResponse};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<String, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

async fn get_categories(State(store): State<Store>) -> ApiResponse<CategoriesResponse> {
    let categories = store.all_categories().await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(&categories),
    }))
}

async fn category_questions(
    State(store): State<Store>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<CategoryQuestions> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;
    let category = store
        .category_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    let questions = store.questions_for_category(id).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoryQuestions {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: category.kind,
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
}
