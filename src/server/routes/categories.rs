use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions::get_questions_for_category},
        Category, Question,
    },
    pagination::paginate,
    server::{app::AppState, extract::IdPath},
};

use super::{ApiError, ApiResponse, PageQuery};

#[derive(Serialize)]
struct CategoriesList {
    success: bool,
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesList>> {
    let categories = get_all_categories(&pool).await?;
    Ok(Json(CategoriesList {
        success: true,
        categories,
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath<i64>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<Json<CategoryQuestions>> {
    let questions = get_questions_for_category(&pool, id).await?;
    if questions.is_empty() {
        tracing::info!("No questions in category {id}");
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoryQuestions {
        success: true,
        total_questions: questions.len(),
        questions: paginate(questions, query.page()),
        current_category: id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
