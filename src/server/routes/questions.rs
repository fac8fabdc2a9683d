use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::categories::get_all_categories,
        queries::questions::{
            self, count_questions, get_question_by_id, get_questions_page, search_questions,
        },
        NewQuestion, Question,
    },
    pagination::{page_window, QUESTIONS_PER_PAGE},
    server::{
        app::AppState,
        deserializers::deserialize_lenient_page,
        error::ApiError,
        extract::{ApiJson, ApiPath, ApiQuery},
    },
};

use super::{category_map, ApiResponse};

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_page")]
    page: Option<i64>,
}

#[derive(Deserialize)]
struct QuestionBody {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    categories: BTreeMap<i64, String>,
    #[serde(rename = "totalQuestions")]
    total_questions: i64,
}

#[derive(Serialize)]
struct DeletedQuestion {
    success: bool,
    deleted_id: i64,
}

#[derive(Serialize)]
struct CreatedQuestion {
    success: bool,
    created_id: i64,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    #[serde(rename = "searchTerm")]
    search_term: String,
    questions: Vec<Question>,
    categories: Vec<i64>,
    total_questions: usize,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let total = count_questions(&pool).await?;
    let window = page_window(query.page.unwrap_or(1), total, QUESTIONS_PER_PAGE)?;

    tracing::debug!(
        page = window.page,
        total_pages = window.total_pages,
        "Listing questions"
    );

    let questions = get_questions_page(&pool, window.limit, window.offset).await?;
    let categories = get_all_categories(&pool).await?;

    Ok(Json(QuestionsPage {
        success: true,
        questions,
        categories: category_map(categories),
        total_questions: total,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<DeletedQuestion>> {
    if get_question_by_id(&pool, id).await?.is_none() {
        return Err(ApiError::not_found("Question does not exist"));
    }

    questions::delete_question(&pool, id).await?;
    if get_question_by_id(&pool, id).await?.is_some() {
        return Err(ApiError::Internal("Could not delete question".to_owned()));
    }
    tracing::info!(id, "Deleted question");

    Ok(Json(DeletedQuestion {
        success: true,
        deleted_id: id,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<QuestionBody>,
) -> ApiResponse<Json<CreatedQuestion>> {
    let Some(category) = body.category else {
        return Err(ApiError::not_found("No category found"));
    };
    let question = body.question.trim();
    if question.is_empty() {
        return Err(ApiError::Unprocessable("Missing question text".to_owned()));
    }
    let answer = body.answer.trim();
    if answer.is_empty() {
        return Err(ApiError::Unprocessable("Missing answer text".to_owned()));
    }

    let new_question = NewQuestion {
        question,
        answer,
        category,
        difficulty: body.difficulty,
    };
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(|error| match error {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                ApiError::not_found("Category does not exist")
            }
            other => ApiError::from(other),
        })?;
    tracing::info!(id, category, "Created question");

    Ok(Json(CreatedQuestion {
        success: true,
        created_id: id,
    }))
}

async fn search(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let questions = search_questions(&pool, &body.search_term).await?;
    if questions.is_empty() {
        return Err(ApiError::not_found("No item found"));
    }

    let categories = questions.iter().map(|q| q.category).sorted().dedup().collect();
    Ok(Json(SearchResults {
        success: true,
        search_term: body.search_term,
        total_questions: questions.len(),
        categories,
        questions,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route("/questions/search", post(search))
        .route("/questions/{question_id}", delete(delete_question))
        .with_state(state)
}
