//! Diagnostic account listing. Token required.

use axum::Json;
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::account::{Account, AccountRepository};
use crate::error::Result;
use crate::{AppState, ServerError};

const BEARER: &str = "Bearer ";

/// Custom middleware for authentification.
pub async fn auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response> {
    let token = match req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
    {
        Some(token) => token.replace(BEARER, ""),
        None => return Err(ServerError::Unauthorized),
    };

    state.token.decode(&token)?;
    Ok(next.run(req).await)
}

/// Handler listing every stored account.
pub async fn handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Account>>> {
    let accounts =
        AccountRepository::new(state.db.sqlite.clone()).all().await?;

    Ok(Json(accounts))
}
