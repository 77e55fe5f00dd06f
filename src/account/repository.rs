//! Handle database requests for accounts.

use sqlx::SqlitePool;

use crate::account::Account;
use crate::error::Result;

/// Data access for the `accounts` table.
#[derive(Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Create a new [`AccountRepository`].
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new [`Account`] and return its assigned identifier.
    pub async fn insert(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"INSERT INTO accounts (username, email, password)
                VALUES (?, ?, ?)"#,
        )
        .bind(username)
        .bind(email)
        .bind(password)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Find an account using the `email` field.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"SELECT id, username, email, password
                FROM accounts WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Every stored account, oldest first.
    pub async fn all(&self) -> Result<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"SELECT id, username, email, password
                FROM accounts ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }
}
