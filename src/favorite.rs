//! Handle database requests for favorites.

use sqlx::SqlitePool;

use crate::error::Result;

#[derive(Clone)]
pub struct FavoriteRepository {
    pool: SqlitePool,
}

impl FavoriteRepository {
    /// Create a new [`FavoriteRepository`].
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Link a movie to an account. The pair is not checked for duplicates.
    pub async fn add(&self, account_id: i64, movie_id: &str) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO favorites (account_id, movie_id) VALUES (?, ?)"#,
        )
        .bind(account_id)
        .bind(movie_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete every row matching the pair. A no-op when none match.
    pub async fn remove(&self, account_id: i64, movie_id: &str) -> Result<()> {
        sqlx::query(
            r#"DELETE FROM favorites WHERE account_id = ? AND movie_id = ?"#,
        )
        .bind(account_id)
        .bind(movie_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All movie identifiers linked to an account, oldest first.
    pub async fn list(&self, account_id: i64) -> Result<Vec<String>> {
        let movie_ids = sqlx::query_scalar::<_, String>(
            r#"SELECT movie_id FROM favorites
                WHERE account_id = ? ORDER BY rowid"#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movie_ids)
    }
}
