mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use axum::extract::{rejection::QueryRejection, Query};
use axum::Json;
use serde::Deserialize;

use crate::{db::Category, pagination::Page};

use super::error::ApiError;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default)]
    page: Page,
}

/// A query string that cannot be read at all (e.g. `page` given twice)
/// falls back to the first page, like a non-numeric `page`.
fn requested_page(query: Result<Query<PageQuery>, QueryRejection>) -> Page {
    match query {
        Ok(Query(PageQuery { page })) => page,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "unreadable query string");
            Page::default()
        }
    }
}

/// Categories keyed by id, the shape the web client renders filters from.
/// JSON object keys come out as strings: `{"1": "Science"}`.
pub(crate) fn category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.label)).collect()
}
