use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions},
        NewQuestion, Question,
    },
    pagination::paginate,
    server::{app::AppState, deserializers::deserialize_optional_i64, error::ApiError},
    telemetry::{QUESTIONS_CREATED_CNTR, QUESTIONS_DELETED_CNTR},
};

use super::{category_map, requested_page, ApiResponse, PageQuery};

// every field is optional here so a missing one becomes a 422 with a useful
// message instead of an extractor rejection
#[derive(Deserialize)]
struct CreateQuestion {
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    difficulty: Option<i64>,
}

impl CreateQuestion {
    fn validate(self) -> Result<NewQuestion, ApiError> {
        let missing = |field: &str| ApiError::Unprocessable(format!("{field} is required"));
        let new_question = NewQuestion {
            question: self.question.ok_or_else(|| missing("question"))?,
            answer: self.answer.ok_or_else(|| missing("answer"))?,
            category: self.category.ok_or_else(|| missing("category"))?,
            difficulty: self.difficulty.ok_or_else(|| missing("difficulty"))?,
        };
        if new_question.difficulty < 1 {
            return Err(ApiError::Unprocessable(
                "difficulty must be a positive integer".to_owned(),
            ));
        }
        Ok(new_question)
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct SearchResultsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct CreatedBody {
    success: bool,
    question: Question,
}

#[derive(Serialize)]
struct DeletedBody {
    success: bool,
    deleted: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<QuestionsBody> {
    let page = requested_page(query);
    let all = questions::get_all_questions(&pool).await?;
    if all.is_empty() {
        return Err(ApiError::NotFound);
    }
    let categories = get_all_categories(&pool).await?;
    Ok(Json(QuestionsBody {
        success: true,
        total_questions: all.len(),
        questions: paginate(all, page),
        categories: category_map(categories),
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<SearchResultsBody> {
    let page = requested_page(query);
    let Json(body) = body.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    let term = body
        .search_term
        .ok_or_else(|| ApiError::Unprocessable("searchTerm is required".to_owned()))?;

    let found = questions::search_questions(&pool, &term).await?;
    tracing::debug!(term = %term, matches = found.len(), "searched questions");
    if found.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SearchResultsBody {
        success: true,
        total_questions: found.len(),
        questions: paginate(found, page),
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<CreateQuestion>, JsonRejection>,
) -> ApiResponse<CreatedBody> {
    let Json(body) = body.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    let new_question = body.validate()?;

    let id = questions::create_question(&pool, &new_question).await?;
    let question = questions::get_question_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::Unprocessable(format!("question {id} was not stored")))?;

    QUESTIONS_CREATED_CNTR.inc();
    tracing::info!(id, category = question.category, "question created");
    Ok(Json(CreatedBody {
        success: true,
        question,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<DeletedBody> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;
    if questions::get_question_by_id(&pool, id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let removed = questions::delete_question(&pool, id)
        .await
        .map_err(|e| ApiError::Unprocessable(e.to_string()))?;
    // removed concurrently between the lookup and the delete
    if removed == 0 {
        return Err(ApiError::NotFound);
    }

    QUESTIONS_DELETED_CNTR.inc();
    tracing::info!(id, "question deleted");
    Ok(Json(DeletedBody {
        success: true,
        deleted: id,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(search_questions))
        .route("/questions/create", post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
