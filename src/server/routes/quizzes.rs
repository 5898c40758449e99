use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    quiz::{select_next, Selection, ALL_CATEGORIES},
    server::{app::AppState, deserializers::deserialize_optional_i64, error::ApiError},
    telemetry::{QUIZ_EXHAUSTED_CNTR, QUIZ_SERVED_CNTR},
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizRequest {
    quiz_category: Option<QuizCategory>,
    previous_questions: Option<Vec<i64>>,
}

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    id: Option<i64>,
    #[serde(rename = "type")]
    label: Option<String>,
}

#[derive(Serialize)]
struct QuizBody {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<QuizBody> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let category = body
        .quiz_category
        .ok_or_else(|| ApiError::BadRequest("quiz_category is required".to_owned()))?;
    let previous: HashSet<i64> = body
        .previous_questions
        .ok_or_else(|| ApiError::BadRequest("previous_questions is required".to_owned()))?
        .into_iter()
        .collect();
    let category_id = category
        .id
        .ok_or_else(|| ApiError::BadRequest("quiz_category.id is required".to_owned()))?;

    let pool_questions = if category_id == ALL_CATEGORIES {
        questions::get_all_questions(&pool).await?
    } else {
        questions::get_questions_for_category(&pool, category_id).await?
    };
    tracing::debug!(
        category = category_id,
        label = category.label.as_deref().unwrap_or("<none>"),
        pool = pool_questions.len(),
        previous = previous.len(),
        "selecting quiz question"
    );

    let label = metric_label(category_id, pool_questions.is_empty());
    let question = match select_next(pool_questions, &previous, &mut rand::thread_rng()) {
        Selection::Next(question) => {
            QUIZ_SERVED_CNTR.with_label_values(&[label.as_str()]).inc();
            Some(question)
        }
        Selection::Exhausted => {
            QUIZ_EXHAUSTED_CNTR.with_label_values(&[label.as_str()]).inc();
            tracing::info!(category = category_id, "quiz exhausted");
            None
        }
    };

    Ok(Json(QuizBody {
        success: true,
        question,
    }))
}

/// Only categories that hold questions get their own series, so arbitrary
/// client ids cannot grow the registry.
fn metric_label(category_id: i64, pool_is_empty: bool) -> String {
    if category_id == ALL_CATEGORIES {
        "all".to_owned()
    } else if pool_is_empty {
        "unknown".to_owned()
    } else {
        category_id.to_string()
    }
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
