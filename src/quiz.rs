//! Next question selection for the quiz game.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::Question;

/// Which questions a quiz draws from. The frontend sends category id 0 for
/// "all categories".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl From<i64> for QuizScope {
    fn from(id: i64) -> Self {
        match id {
            0 => QuizScope::All,
            id => QuizScope::Category(id),
        }
    }
}

impl QuizScope {
    /// Label used for the served questions counter.
    pub fn label(&self) -> String {
        match self {
            QuizScope::All => "all".to_owned(),
            QuizScope::Category(id) => id.to_string(),
        }
    }
}

/// Picks uniformly among the candidates not yet asked. `None` means the quiz
/// is exhausted.
pub fn pick_next_question<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous_questions: &[i64],
    rng: &mut R,
) -> Option<Question> {
    let remaining: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !previous_questions.contains(&q.id))
        .collect();
    remaining.choose(rng).cloned()
}
