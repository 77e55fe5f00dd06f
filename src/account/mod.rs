//! Accounts and their persistence.

mod repository;

pub use repository::*;

use serde::{Deserialize, Serialize};

/// Account as saved on database.
#[derive(
    Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow,
)]
pub struct Account {
    /// Opaque unique key, assigned at creation.
    pub id: i64,
    /// Display name, immutable after registration.
    pub username: String,
    /// Unique across all accounts; used as the login key.
    pub email: String,
    /// Salted one-way digest. Never serialized in responses.
    #[serde(skip)]
    pub password: String,
}
