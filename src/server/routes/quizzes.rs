use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    db::{Question, Store},
    server::app::AppState,
    telemetry::QUIZ_QUESTIONS_SERVED,
    trivia::quiz::{select_question, RandomSource},
};

use super::{ApiError, ApiResponse};

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Option<Vec<i64>>,
    quiz_category: QuizCategory,
}

// clients send the whole category object, only its name is used
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    #[serde(serialize_with = "question_or_false")]
    question: Option<Question>,
}

fn question_or_false<S>(question: &Option<Question>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match question {
        Some(question) => question.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

async fn next_question(
    State(store): State<Store>,
    State(random): State<Arc<dyn RandomSource>>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<QuizResponse> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected quiz payload: {rejection}");
        ApiError::BadRequest
    })?;
    let category = store
        .category_by_type(&request.quiz_category.kind)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Unknown quiz category {:?}", request.quiz_category.kind);
            ApiError::BadRequest
        })?;
    let previous = request.previous_questions.unwrap_or_default();
    let questions = store.questions_for_category(category.id).await?;

    let question = select_question(&questions, &previous, random.as_ref()).cloned();
    match &question {
        Some(question) => {
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[category.kind.as_str()])
                .inc();
            tracing::info!(id = question.id, category = %category.kind, "Serving quiz question");
        }
        None => {
            tracing::info!(category = %category.kind, asked = previous.len(), "Quiz exhausted");
        }
    }
    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(next_question))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_quiz_serializes_false() {
        let body = serde_json::to_value(QuizResponse {
            success: true,
            question: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "question": false}));
    }

    #[test]
    fn request_ignores_extra_category_fields() {
        let request: QuizRequest = serde_json::from_str(
            r#"{"previous_questions": [1, 2], "quiz_category": {"type": "Science", "id": "1"}}"#,
        )
        .unwrap();
        assert_eq!(request.previous_questions, Some(vec![1, 2]));
        assert_eq!(request.quiz_category.kind, "Science");
    }

    #[test]
    fn previous_questions_may_be_omitted() {
        let request: QuizRequest =
            serde_json::from_str(r#"{"quiz_category": {"type": "Art"}}"#).unwrap();
        assert!(request.previous_questions.is_none());
    }
}
