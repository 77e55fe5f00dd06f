//! database (db) union structure.
use std::str::FromStr;

use axum::extract::FromRef;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::AppState;

pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Custom db structure to pass to Axum.
#[derive(Clone)]
pub struct Database {
    pub sqlite: SqlitePool,
}

impl Database {
    /// Init database connections.
    pub async fn new(path: &str, pool: u32) -> Result<Self, sqlx::Error> {
        let options =
            SqliteConnectOptions::from_str(path)?.create_if_missing(true);
        let sqlite = SqlitePoolOptions::new()
            .max_connections(pool)
            .connect_with(options)
            .await?;

        tracing::info!(%path, "sqlite connected");

        Ok(Self { sqlite })
    }

    /// Create tables on start. Schema migrations are out of scope.
    ///
    /// `favorites` carries no uniqueness constraint: duplicate
    /// (account_id, movie_id) rows are allowed.
    pub async fn create_tables(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            )"#,
        )
        .execute(&self.sqlite)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS favorites (
                account_id INTEGER NOT NULL,
                movie_id TEXT NOT NULL
            )"#,
        )
        .execute(&self.sqlite)
        .await?;

        Ok(())
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(app_state: &AppState) -> Database {
        app_state.db.clone()
    }
}
