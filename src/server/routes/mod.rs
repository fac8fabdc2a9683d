mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use crate::db::Category;

use super::error::ApiError;

pub type ApiResponse<T> = Result<T, ApiError>;

/// `{id: name}` mapping used by every payload that embeds the category list.
fn category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.name)).collect()
}
