use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_all_categories,
            questions::{self, get_all_questions, search_questions},
        },
        Category, NewQuestion, Question,
    },
    pagination::paginate,
    server::{
        app::AppState,
        deserializers::LenientInt,
        extract::{IdPath, JsonBody},
    },
};

use super::{ApiError, ApiResponse, PageQuery, Success};

#[derive(Deserialize)]
struct CreateQuestion {
    question: Option<String>,
    answer: Option<String>,
    category: Option<LenientInt>,
    difficulty: Option<LenientInt>,
}

fn int_field(field: &'static str, value: Option<LenientInt>) -> Result<Option<i64>, ApiError> {
    value
        .map(|v| {
            v.into_i64().map_err(|value| ApiError::InvalidField {
                field,
                value: value.to_string(),
            })
        })
        .transpose()
}

impl TryFrom<CreateQuestion> for NewQuestion {
    type Error = ApiError;

    fn try_from(body: CreateQuestion) -> Result<Self, Self::Error> {
        Ok(NewQuestion {
            question: body.question,
            answer: body.answer,
            category: int_field("category", body.category)?,
            difficulty: int_field("difficulty", body.difficulty)?,
        })
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", alias = "search")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    categories: Vec<Category>,
    total_questions: usize,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn questions_page(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let questions = get_all_questions(&pool).await?;
    let categories = get_all_categories(&pool).await?;
    Ok(Json(QuestionsPage {
        success: true,
        total_questions: questions.len(),
        questions: paginate(questions, query.page()),
        categories,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    JsonBody(body): JsonBody<CreateQuestion>,
) -> ApiResponse<Json<Success>> {
    let new_question = NewQuestion::try_from(body)?;
    let id = questions::create_question(&pool, &new_question).await?;
    tracing::info!("Created question {id}");
    Ok(Json(Success::ok()))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath<i64>,
) -> ApiResponse<Json<Success>> {
    if !questions::delete_question(&pool, id).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!("Deleted question {id}");
    Ok(Json(Success::ok()))
}

async fn search(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
    JsonBody(body): JsonBody<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let term = body.search_term.unwrap_or_default();
    let questions = search_questions(&pool, &term).await?;
    tracing::debug!("Search {term:?} matched {} questions", questions.len());
    Ok(Json(SearchResults {
        success: true,
        total_questions: questions.len(),
        questions: paginate(questions, query.page()),
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(questions_page).post(create_question))
        .route("/questions/search", post(search))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
