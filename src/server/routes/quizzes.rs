use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::categories::category_exists,
        queries::questions::{get_question_by_id, get_question_ids},
        CategorySelector, Question,
    },
    quiz::pick_question,
    server::{
        app::AppState, deserializers::deserialize_category_selector, error::ApiError,
        extract::ApiJson,
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(deserialize_with = "deserialize_category_selector")]
    quiz_category: CategorySelector,
    #[serde(default)]
    previous_questions: Vec<i64>,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Question,
    question_id: i64,
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<Json<QuizQuestion>> {
    if let CategorySelector::Id(id) = request.quiz_category {
        if !category_exists(&pool, id).await? {
            return Err(ApiError::not_found("Category does not exist"));
        }
    }

    let candidates = get_question_ids(&pool, request.quiz_category).await?;
    if candidates.is_empty() {
        return Err(ApiError::not_found("No question in category"));
    }

    let next = {
        let mut rng = rand::thread_rng();
        pick_question(&candidates, &request.previous_questions, &mut rng)
    };
    let Some(id) = next else {
        return Err(ApiError::not_found("No new question"));
    };

    let question = get_question_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Question does not exist"))?;
    QUIZ_QUESTIONS_SERVED
        .with_label_values(&[request.quiz_category.label()])
        .inc();
    tracing::debug!(
        id,
        category = request.quiz_category.marker(),
        served = request.previous_questions.len(),
        "Serving quiz question"
    );

    Ok(Json(QuizQuestion {
        success: true,
        question_id: question.id,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
