use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub name: String,
}

/// Which questions a request is scoped to. `0` on the wire selects every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySelector {
    All,
    Id(i64),
}

impl CategorySelector {
    /// The value reported back to clients as `currentCategory`.
    pub fn marker(&self) -> i64 {
        match self {
            CategorySelector::All => 0,
            CategorySelector::Id(id) => *id,
        }
    }

    pub fn label(&self) -> String {
        match self {
            CategorySelector::All => "all".to_owned(),
            CategorySelector::Id(id) => id.to_string(),
        }
    }
}

impl From<i64> for CategorySelector {
    fn from(value: i64) -> Self {
        match value {
            0 => CategorySelector::All,
            id => CategorySelector::Id(id),
        }
    }
}

impl FromStr for CategorySelector {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(CategorySelector::from)
    }
}

pub async fn create_category(pool: &SqlitePool, name: &str) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
INSERT INTO categories (type) VALUES (?1)
        "#,
    )
    .bind(name)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, type AS name
FROM categories
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, type AS name
FROM categories
WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn category_exists(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    Ok(get_category(pool, id).await?.is_some())
}

pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for category in categories {
        sqlx::query(
            r#"
INSERT INTO categories (id, type) VALUES (?1, ?2)
            "#,
        )
        .bind(category.id)
        .bind(category.name)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
