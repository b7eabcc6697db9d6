use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

/// Fields are passed through as given; the table constraints decide what is
/// acceptable.
#[derive(Debug, Default, Clone)]
pub struct NewQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring match on the question text. Matching runs in
/// memory so case folding covers non-ASCII text too. A blank term matches
/// every question.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let questions = get_all_questions(pool).await?;
    if term.trim().is_empty() {
        return Ok(questions);
    }
    Ok(filter_by_text(questions, term))
}

fn filter_by_text(questions: Vec<Question>, term: &str) -> Vec<Question> {
    let needle = term.to_lowercase();
    questions
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .collect()
}

pub async fn create_question(pool: &SqlitePool, new_question: &NewQuestion) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(new_question.question.as_deref())
    .bind(new_question.answer.as_deref())
    .bind(new_question.category)
    .bind(new_question.difficulty)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns whether a row was actually removed.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let deleted = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(deleted > 0)
}

/// Upserts by id, leaving questions missing from `questions` untouched.
pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                category = excluded.category,
                difficulty = excluded.difficulty
            "#,
        )
        .bind(question.id)
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: Some(text.to_owned()),
            answer: Some("answer".to_owned()),
            category: Some(category),
            difficulty: Some(1),
        }
    }

    async fn seeded_pool() -> SqlitePool {
        let pool = test_pool().await;
        for (text, category) in [
            ("What is the capital of France?", 3),
            ("Who painted the Mona Lisa?", 2),
            ("what is 2 + 2?", 1),
            ("Which planet is 100% red?", 1),
        ] {
            create_question(&pool, &new_question(text, category))
                .await
                .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let pool = test_pool().await;
        let first = create_question(&pool, &new_question("a", 1)).await.unwrap();
        let second = create_question(&pool, &new_question("b", 1)).await.unwrap();
        assert!(second > first);

        let all = get_all_questions(&pool).await.unwrap();
        let stored = all.iter().find(|q| q.id == second).unwrap();
        assert_eq!(stored.question, "b");
        assert_eq!(stored.category, Some(1));
    }

    #[tokio::test]
    async fn create_without_text_violates_constraint() {
        let pool = test_pool().await;
        let incomplete = NewQuestion {
            answer: Some("answer".to_owned()),
            ..Default::default()
        };
        assert!(create_question(&pool, &incomplete).await.is_err());
        assert!(get_all_questions(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let pool = seeded_pool().await;
        let found = search_questions(&pool, "WHAT").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found
            .iter()
            .all(|q| q.question.to_lowercase().contains("what")));
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let pool = seeded_pool().await;
        let found = search_questions(&pool, "100%").await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(search_questions(&pool, "_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let pool = test_pool().await;
        create_question(&pool, &new_question("Où est l'ÉCOLE?", 1))
            .await
            .unwrap();
        create_question(&pool, &new_question("Что такое Москва?", 1))
            .await
            .unwrap();
        assert_eq!(search_questions(&pool, "école").await.unwrap().len(), 1);
        assert_eq!(search_questions(&pool, "москва").await.unwrap().len(), 1);
        assert_eq!(search_questions(&pool, "ÉCOLE").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn search_keeps_surrounding_whitespace() {
        let pool = test_pool().await;
        create_question(&pool, &new_question("Is Lisa here?", 1))
            .await
            .unwrap();
        create_question(&pool, &new_question("Who is Mona?", 1))
            .await
            .unwrap();
        let found = search_questions(&pool, " is ").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "Who is Mona?");
    }

    #[tokio::test]
    async fn blank_search_matches_everything() {
        let pool = seeded_pool().await;
        assert_eq!(search_questions(&pool, "   ").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn filters_by_category() {
        let pool = seeded_pool().await;
        let found = get_questions_for_category(&pool, 1).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|q| q.category == Some(1)));
        assert!(get_questions_for_category(&pool, 99)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let pool = seeded_pool().await;
        assert!(delete_question(&pool, 1).await.unwrap());
        assert!(!delete_question(&pool, 1).await.unwrap());
        let ids: Vec<i64> = get_all_questions(&pool)
            .await
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn import_keeps_given_ids() {
        let pool = test_pool().await;
        let question = Question {
            id: 20,
            question: "Imported?".to_owned(),
            answer: "Yes".to_owned(),
            category: None,
            difficulty: Some(5),
        };
        import_questions(&pool, vec![question.clone()]).await.unwrap();
        assert_eq!(get_all_questions(&pool).await.unwrap(), vec![question]);
    }
}
