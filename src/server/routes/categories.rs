use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::categories::{self, category_exists, get_all_categories},
        queries::questions::get_questions_for_selector,
        CategorySelector, Question,
    },
    server::{
        app::AppState,
        error::ApiError,
        extract::{ApiJson, ApiPath},
    },
};

use super::{category_map, ApiResponse};

#[derive(Deserialize)]
struct NewCategory {
    new_category_name: String,
}

#[derive(Serialize)]
struct CategoryList {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CreatedCategory {
    success: bool,
    category_id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoryList>> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::not_found("No categories found"));
    }
    Ok(Json(CategoryList {
        success: true,
        categories: category_map(categories),
    }))
}

async fn create_category(
    State(pool): State<SqlitePool>,
    ApiJson(new_category): ApiJson<NewCategory>,
) -> ApiResponse<Json<CreatedCategory>> {
    let name = new_category.new_category_name.trim();
    if name.is_empty() {
        return Err(ApiError::Unprocessable("Missing category name".to_owned()));
    }

    // the UNIQUE constraint on `type` is what rejects concurrent duplicates
    let id = categories::create_category(&pool, name)
        .await
        .map_err(|error| match error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::Conflict("Category already exists".to_owned())
            }
            other => ApiError::from(other),
        })?;
    tracing::info!(id, name, "Created category");

    Ok(Json(CreatedCategory {
        success: true,
        category_id: id,
    }))
}

async fn get_category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(category): ApiPath<String>,
) -> ApiResponse<Json<CategoryQuestions>> {
    let selector: CategorySelector = category
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid category id: {category}")))?;

    if let CategorySelector::Id(id) = selector {
        if !category_exists(&pool, id).await? {
            return Err(ApiError::not_found("Category does not exist"));
        }
    }

    let questions = get_questions_for_selector(&pool, selector).await?;
    if questions.is_empty() {
        return Err(ApiError::not_found("No question in category"));
    }

    Ok(Json(CategoryQuestions {
        success: true,
        total_questions: questions.len(),
        current_category: selector.marker(),
        questions,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories).post(create_category))
        .route(
            "/categories/{category_id}/questions",
            get(get_category_questions),
        )
        .with_state(state)
}
