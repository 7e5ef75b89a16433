use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::{NewQuestion, Question, Store},
    server::{
        app::{AppState, PageSize},
        deserializers::PageQuery,
    },
    telemetry::QUESTION_MUTATIONS,
    trivia::{
        category_map,
        pagination::paginate,
        search::{search, SearchTerm},
    },
};

use super::{ApiError, ApiResponse};

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct CreatedQuestion {
    success: bool,
    question: Question,
}

#[derive(Serialize)]
struct DeletedQuestion {
    success: bool,
    deleted_id: i64,
    message: &'static str,
}

async fn get_questions(
    State(store): State<Store>,
    State(PageSize(page_size)): State<PageSize>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<QuestionsPage> {
    let questions = store.all_questions().await?;
    let page = paginate(&questions, query.page, page_size);
    if page.is_empty() {
        return Err(ApiError::NotFound);
    }
    let categories = store.all_categories().await?;
    Ok(Json(QuestionsPage {
        success: true,
        questions: page.to_vec(),
        total_questions: questions.len(),
        categories: category_map(&categories),
    }))
}

async fn create_question(
    State(store): State<Store>,
    payload: Result<Json<NewQuestion>, JsonRejection>,
) -> ApiResponse<CreatedQuestion> {
    let Json(new_question) = payload.map_err(|rejection| {
        tracing::warn!("Rejected question payload: {rejection}");
        ApiError::Unprocessable
    })?;
    let question = store
        .create_question(&new_question)
        .await
        .map_err(ApiError::from_write)?;
    QUESTION_MUTATIONS.with_label_values(&["create"]).inc();
    tracing::info!(id = question.id, category = question.category, "Question created");
    Ok(Json(CreatedQuestion {
        success: true,
        question,
    }))
}

async fn delete_question(
    State(store): State<Store>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<DeletedQuestion> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;
    store
        .delete_question(id)
        .await
        .map_err(ApiError::from_write)?;
    QUESTION_MUTATIONS.with_label_values(&["delete"]).inc();
    tracing::info!(id, "Question deleted");
    Ok(Json(DeletedQuestion {
        success: true,
        deleted_id: id,
        message: "Question deleted",
    }))
}

async fn search_questions(
    State(store): State<Store>,
    State(PageSize(page_size)): State<PageSize>,
    Query(query): Query<PageQuery>,
    payload: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<SearchResults> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::warn!("Rejected search payload: {rejection}");
        ApiError::BadRequest
    })?;
    let term = SearchTerm::parse(body.search_term).ok_or(ApiError::NotFound)?;
    let questions = store.all_questions().await?;
    let matches = search(&questions, &term);
    let page = paginate(&matches, query.page, page_size);
    if page.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SearchResults {
        success: true,
        questions: page.iter().map(|question| (*question).clone()).collect(),
        total_questions: matches.len(),
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
}
