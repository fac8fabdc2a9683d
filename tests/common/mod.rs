#![allow(dead_code)]

use std::str::FromStr;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;

use trivia_api::db::queries::{categories, questions};
use trivia_api::db::{run_migrations, NewQuestion};

pub const CATEGORIES_TO_INSERT: usize = 5;
pub const QUESTIONS_TO_INSERT: usize = 12;

/// Single-connection in-memory database; every pooled connection would otherwise get its own.
pub async fn create_test_db() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

/// Creates "Cat 0".."Cat n-1" and returns their ids in creation order.
pub async fn insert_categories(pool: &SqlitePool, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        ids.push(
            categories::create_category(pool, &format!("Cat {i}"))
                .await
                .unwrap(),
        );
    }
    ids
}

/// Question `i` goes to category `(i + 1) % categories.len()` with difficulty `i % 5`.
pub async fn insert_questions(pool: &SqlitePool, categories: &[i64], count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let question = format!("Question {i}?");
        let answer = format!("Answer {i}");
        let new_question = NewQuestion {
            question: &question,
            answer: &answer,
            category: categories[(i + 1) % categories.len()],
            difficulty: (i % 5) as i64,
        };
        ids.push(questions::create_question(pool, &new_question).await.unwrap());
    }
    ids
}

pub async fn seeded_db() -> (SqlitePool, Vec<i64>, Vec<i64>) {
    let pool = create_test_db().await;
    let category_ids = insert_categories(&pool, CATEGORIES_TO_INSERT).await;
    let question_ids = insert_questions(&pool, &category_ids, QUESTIONS_TO_INSERT).await;
    (pool, category_ids, question_ids)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri, None).await
}

pub fn assert_failure(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status, status, "body: {}", response.body);
    assert_eq!(response.body["success"], Value::Bool(false));
    assert_eq!(response.body["message"], message);
}
