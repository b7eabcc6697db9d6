mod categories;
mod questions;
mod quizzes;

use serde::{Deserialize, Serialize};

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use super::deserializers::deserialize_lenient_page;
pub use super::error::{ApiError, ApiResponse};

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_page")]
    page: Option<i64>,
}

impl PageQuery {
    fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }
}

#[derive(Serialize)]
struct Success {
    success: bool,
}

impl Success {
    fn ok() -> Self {
        Success { success: true }
    }
}
