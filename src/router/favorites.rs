//! Favorites HTTP API.
//!
//! These routes trust the caller-supplied account identifier and are not
//! token-gated; they mirror the historical surface of this API.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::error::Result;
use crate::favorite::FavoriteRepository;
use crate::router::Valid;

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    pub user_id: i64,
    pub movie_id: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub favorites: Vec<String>,
}

/// Handler to link a movie to an account.
pub async fn add(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<&'static str> {
    FavoriteRepository::new(state.db.sqlite.clone())
        .add(body.user_id, &body.movie_id)
        .await?;

    Ok("movie added to favorites")
}

/// Handler to unlink a movie from an account.
///
/// Succeeds even when the pair was never linked.
pub async fn remove(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<&'static str> {
    FavoriteRepository::new(state.db.sqlite.clone())
        .remove(body.user_id, &body.movie_id)
        .await?;

    Ok("movie removed from favorites")
}

/// Handler to list every movie linked to an account.
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Response>> {
    let favorites = FavoriteRepository::new(state.db.sqlite.clone())
        .list(user_id)
        .await?;

    Ok(Json(Response { favorites }))
}
