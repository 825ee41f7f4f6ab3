use super::Repository;
use crate::domain::Category;
use sqlx::Row;

impl Repository {
    /// All categories ordered by id.
    pub async fn get_all_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        let rows = sqlx::query("SELECT id, type FROM categories ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| Category {
                id: row.get("id"),
                kind: row.get("type"),
            })
            .collect())
    }

    /// Whether a category with the given id exists.
    pub async fn category_exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::migrations::init_db;
    use crate::db::Repository;
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

    #[tokio::test]
    async fn test_seeded_categories_ordered_by_id() {
        let (repo, _temp) = setup_test_db().await;

        let categories = repo.get_all_categories().await.unwrap();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[0].kind, "Science");
        assert_eq!(categories[5].id, 6);
        assert_eq!(categories[5].kind, "Sports");
    }

    #[tokio::test]
    async fn test_category_exists() {
        let (repo, _temp) = setup_test_db().await;

        assert!(repo.category_exists(1).await.unwrap());
        assert!(repo.category_exists(6).await.unwrap());
        assert!(!repo.category_exists(1000).await.unwrap());
    }
}
