use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::questions;
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::telemetry::QUIZ_CNTR;

#[derive(Deserialize)]
struct QuizRequest {
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

// category id 0 means "any category"
#[derive(Deserialize)]
struct QuizCategory {
    id: i64,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Question,
}

fn draw_question(candidates: Vec<Question>, previous: &[i64]) -> Option<Question> {
    let unseen: Vec<Question> = candidates
        .into_iter()
        .filter(|question| !previous.contains(&question.id))
        .collect();
    unseen.choose(&mut rand::thread_rng()).cloned()
}

async fn next_quiz_question(
    State(pool): State<SqlitePool>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResult<QuizResponse> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::Unprocessable(rejection.body_text()))?;

    let candidates = if request.quiz_category.id == 0 {
        questions::get_questions(&pool).await?
    } else {
        questions::get_questions_for_category(&pool, request.quiz_category.id).await?
    };

    let question =
        draw_question(candidates, &request.previous_questions).ok_or(ApiError::NotFound)?;
    QUIZ_CNTR
        .with_label_values(&[question.category.to_string().as_str()])
        .inc();

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_quiz_question))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, category: i64) -> Question {
        Question {
            id,
            question: format!("question {id}"),
            answer: "answer".to_owned(),
            category,
            difficulty: 1,
        }
    }

    #[test]
    fn draw_skips_previously_seen_questions() {
        let candidates = vec![question(1, 1), question(2, 1), question(3, 1)];
        let drawn = draw_question(candidates, &[1, 3]).unwrap();
        assert_eq!(drawn.id, 2);
    }

    #[test]
    fn draw_from_exhausted_pool_is_none() {
        let candidates = vec![question(1, 1), question(2, 1)];
        assert!(draw_question(candidates, &[1, 2]).is_none());
        assert!(draw_question(vec![], &[]).is_none());
    }

    #[test]
    fn draw_only_ever_returns_candidates() {
        let candidates: Vec<Question> = (1..=20).map(|id| question(id, 1)).collect();
        let previous: Vec<i64> = (1..=10).collect();
        for _ in 0..50 {
            let drawn = draw_question(candidates.clone(), &previous).unwrap();
            assert!(drawn.id > 10);
        }
    }
}
