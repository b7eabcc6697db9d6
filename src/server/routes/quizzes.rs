use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::questions::{get_all_questions, get_questions_for_category},
        Question,
    },
    quiz::{pick_next_question, QuizScope},
    server::{app::AppState, deserializers::Inti64, extract::JsonBody},
    telemetry::QUIZ_QUESTIONS_CNTR,
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizCategory {
    id: Inti64,
}

#[derive(Deserialize)]
struct QuizRequest {
    quiz_category: QuizCategory,
    previous_questions: Option<Vec<Inti64>>,
}

#[derive(Serialize)]
struct QuizTurn {
    #[serde(rename = "prevQuestions")]
    prev_questions: Vec<i64>,
    question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    JsonBody(body): JsonBody<QuizRequest>,
) -> ApiResponse<Json<QuizTurn>> {
    let scope = QuizScope::from(i64::from(body.quiz_category.id));
    let previous: Vec<i64> = body
        .previous_questions
        .unwrap_or_default()
        .into_iter()
        .map(i64::from)
        .collect();

    let candidates = match scope {
        QuizScope::All => get_all_questions(&pool).await?,
        QuizScope::Category(id) => get_questions_for_category(&pool, id).await?,
    };
    let question = pick_next_question(candidates, &previous, &mut rand::thread_rng());

    let label = scope.label();
    match &question {
        Some(q) => {
            QUIZ_QUESTIONS_CNTR.with_label_values(&[label.as_str()]).inc();
            tracing::debug!("Quiz in category {label} serves question {}", q.id);
        }
        None => tracing::info!("Quiz in category {label} has no questions left"),
    }

    Ok(Json(QuizTurn {
        prev_questions: previous,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
