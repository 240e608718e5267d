use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::db::{NewQuestion, Question};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::pagination::{paginate, PageQuery};

use super::categories::category_map;

// the legacy API multiplexes search and creation over one POST route,
// discriminated by the presence of searchTerm
#[derive(Deserialize)]
struct QuestionAction {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
    question: Option<String>,
    answer: Option<String>,
    category: Option<i64>,
    difficulty: Option<i64>,
}

#[derive(Serialize)]
struct QuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct StatusResponse {
    success: bool,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
) -> ApiResult<QuestionsResponse> {
    let selection = questions::get_questions(&pool).await?;
    let current = paginate(&selection, query.page());
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    let categories = categories::get_categories(&pool).await?;

    Ok(Json(QuestionsResponse {
        success: true,
        total_questions: selection.len(),
        questions: current.to_vec(),
        categories: category_map(categories),
        current_category: None,
    }))
}

async fn search_or_create_question(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
    payload: Result<Json<QuestionAction>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(action) =
        payload.map_err(|rejection| ApiError::Unprocessable(rejection.body_text()))?;

    if let Some(term) = action.search_term.filter(|term| !term.is_empty()) {
        let selection = questions::search_questions(&pool, &term).await?;
        let current = paginate(&selection, query.page());
        return Ok(Json(SearchResponse {
            success: true,
            total_questions: selection.len(),
            questions: current.to_vec(),
            current_category: None,
        })
        .into_response());
    }

    let new_question = match (
        action.question,
        action.answer,
        action.category,
        action.difficulty,
    ) {
        (Some(question), Some(answer), Some(category), Some(difficulty)) => NewQuestion {
            question,
            answer,
            category,
            difficulty,
        },
        _ => return Err(ApiError::Unprocessable("unprocessable".to_owned())),
    };
    let id = questions::create_question(&pool, &new_question).await?;
    tracing::info!(id, "created question");

    Ok(Json(StatusResponse { success: true }).into_response())
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResult<StatusResponse> {
    let deleted = questions::delete_question(&pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(Json(StatusResponse { success: true }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/questions",
            get(get_questions).post(search_or_create_question),
        )
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
