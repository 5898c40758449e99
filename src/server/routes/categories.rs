use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions::get_questions_for_category},
        Question,
    },
    pagination::paginate,
    server::{app::AppState, error::ApiError},
};

use super::{category_map, requested_page, ApiResponse, PageQuery};

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: BTreeMap<i64, String>,
    total_categories: usize,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesBody> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesBody {
        success: true,
        total_categories: categories.len(),
        categories: category_map(categories),
    }))
}

// an empty category answers 400 rather than the 404 used by search and the
// question list; clients depend on the distinction
async fn questions_for_category(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<CategoryQuestionsBody> {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let page = requested_page(query);
    let questions = get_questions_for_category(&pool, id).await?;
    if questions.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "category {id} has no questions"
        )));
    }
    Ok(Json(CategoryQuestionsBody {
        success: true,
        total_questions: questions.len(),
        questions: paginate(questions, page),
        current_category: id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
