use super::Repository;
use crate::domain::{NewQuestion, Question};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::collections::HashSet;

fn row_to_question(row: &SqliteRow) -> Question {
    Question {
        id: row.get("id"),
        question: row.get("question"),
        answer: row.get("answer"),
        category: row.get("category"),
        difficulty: row.get("difficulty"),
    }
}

/// Escape LIKE wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl Repository {
    /// All questions ordered by id.
    pub async fn list_questions(&self) -> Result<Vec<Question>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_question).collect())
    }

    /// Look up a single question by id.
    pub async fn get_question(&self, id: i64) -> Result<Option<Question>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT id, question, answer, category, difficulty FROM questions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_question))
    }

    /// Case-insensitive substring search over the question text.
    ///
    /// SQLite's LIKE is case-insensitive for ASCII by default; wildcards in
    /// the term are escaped so they match literally.
    pub async fn search_questions(&self, term: &str) -> Result<Vec<Question>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(term));
        let rows = sqlx::query(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE question LIKE ? ESCAPE '\'
            ORDER BY id ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_question).collect())
    }

    /// All questions in a category, ordered by id.
    pub async fn questions_by_category(&self, category: i64) -> Result<Vec<Question>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE category = ?
            ORDER BY id ASC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_question).collect())
    }

    /// Insert a question and return its generated id.
    ///
    /// # Errors
    /// Returns an error if the insert fails, including a foreign key
    /// violation for an unknown category.
    pub async fn insert_question(&self, question: &NewQuestion) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Delete a question by id. Returns false when no row matched.
    pub async fn delete_question(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Questions eligible for the next quiz round: optionally restricted to a
    /// category, excluding previously served ids, ordered by id.
    ///
    /// The exclusion happens in Rust: binding every previous id as a SQL
    /// placeholder would hit SQLite's per-statement variable limit once a
    /// round has served enough questions.
    pub async fn quiz_candidates(
        &self,
        category: Option<i64>,
        exclude: &[i64],
    ) -> Result<Vec<Question>, sqlx::Error> {
        let rows = match category {
            Some(category) => {
                sqlx::query(
                    r#"
                    SELECT id, question, answer, category, difficulty
                    FROM questions
                    WHERE category = ?
                    ORDER BY id ASC
                    "#,
                )
                .bind(category)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        let excluded: HashSet<i64> = exclude.iter().copied().collect();
        Ok(rows
            .iter()
            .map(row_to_question)
            .filter(|q| !excluded.contains(&q.id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::init_db;
    use tempfile::TempDir;

    async fn setup_test_db() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        (Repository::new(pool), temp_dir)
    }

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "an answer".to_string(),
            category,
            difficulty: 1,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_question() {
        let (repo, _temp) = setup_test_db().await;

        let id = repo
            .insert_question(&new_question("What is the largest ocean?", 3))
            .await
            .unwrap();

        let found = repo.get_question(id).await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.question, "What is the largest ocean?");
        assert_eq!(found.category, 3);
    }

    #[tokio::test]
    async fn test_insert_unknown_category_fails() {
        let (repo, _temp) = setup_test_db().await;

        let result = repo.insert_question(&new_question("orphan?", 1000)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_questions_ordered_by_id() {
        let (repo, _temp) = setup_test_db().await;

        let a = repo.insert_question(&new_question("first?", 1)).await.unwrap();
        let b = repo.insert_question(&new_question("second?", 2)).await.unwrap();

        let all = repo.list_questions().await.unwrap();
        assert_eq!(all.iter().map(|q| q.id).collect::<Vec<_>>(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let (repo, _temp) = setup_test_db().await;

        repo.insert_question(&new_question("What is the Largest ocean?", 3))
            .await
            .unwrap();
        repo.insert_question(&new_question("Who painted the Mona Lisa?", 2))
            .await
            .unwrap();

        let hits = repo.search_questions("largest").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].question, "What is the Largest ocean?");
    }

    #[tokio::test]
    async fn test_search_without_results_is_empty() {
        let (repo, _temp) = setup_test_db().await;

        repo.insert_question(&new_question("anything?", 1))
            .await
            .unwrap();

        let hits = repo.search_questions("jdhfkf").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let (repo, _temp) = setup_test_db().await;

        repo.insert_question(&new_question("Is 100% a percentage?", 1))
            .await
            .unwrap();
        repo.insert_question(&new_question("Is 100 a number?", 1))
            .await
            .unwrap();

        let hits = repo.search_questions("100%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].question, "Is 100% a percentage?");
    }

    #[tokio::test]
    async fn test_questions_by_category() {
        let (repo, _temp) = setup_test_db().await;

        repo.insert_question(&new_question("sports one?", 6)).await.unwrap();
        repo.insert_question(&new_question("sports two?", 6)).await.unwrap();
        repo.insert_question(&new_question("art one?", 2)).await.unwrap();

        let sports = repo.questions_by_category(6).await.unwrap();
        assert_eq!(sports.len(), 2);
        assert!(sports.iter().all(|q| q.category == 6));

        let empty = repo.questions_by_category(1).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_delete_question() {
        let (repo, _temp) = setup_test_db().await;

        let id = repo.insert_question(&new_question("doomed?", 1)).await.unwrap();

        assert!(repo.delete_question(id).await.unwrap());
        assert!(repo.get_question(id).await.unwrap().is_none());
        assert!(!repo.delete_question(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_quiz_candidates_excludes_previous() {
        let (repo, _temp) = setup_test_db().await;

        let a = repo.insert_question(&new_question("one?", 6)).await.unwrap();
        let b = repo.insert_question(&new_question("two?", 6)).await.unwrap();
        let c = repo.insert_question(&new_question("three?", 2)).await.unwrap();

        let candidates = repo.quiz_candidates(Some(6), &[a]).await.unwrap();
        assert_eq!(candidates.iter().map(|q| q.id).collect::<Vec<_>>(), vec![b]);

        let all = repo.quiz_candidates(None, &[a, b]).await.unwrap();
        assert_eq!(all.iter().map(|q| q.id).collect::<Vec<_>>(), vec![c]);
    }

    #[tokio::test]
    async fn test_quiz_candidates_with_very_long_exclusion_list() {
        let (repo, _temp) = setup_test_db().await;

        let a = repo.insert_question(&new_question("one?", 6)).await.unwrap();
        let b = repo.insert_question(&new_question("two?", 6)).await.unwrap();

        // Far more ids than SQLite allows as bind parameters in one statement.
        let mut exclude: Vec<i64> = (100_000..140_000).collect();
        exclude.push(a);

        let candidates = repo.quiz_candidates(Some(6), &exclude).await.unwrap();
        assert_eq!(candidates.iter().map(|q| q.id).collect::<Vec<_>>(), vec![b]);
    }

    #[tokio::test]
    async fn test_quiz_candidates_exhausted_category() {
        let (repo, _temp) = setup_test_db().await;

        let a = repo.insert_question(&new_question("only one?", 6)).await.unwrap();

        let candidates = repo.quiz_candidates(Some(6), &[a]).await.unwrap();
        assert!(candidates.is_empty());
    }
}
