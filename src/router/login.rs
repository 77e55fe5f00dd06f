use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::account::AccountRepository;
use crate::error::{Result, ServerError};
use crate::router::Valid;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[validate(length(min = 1, message = "Email is required."))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub token: String,
}

/// Handler to verify credentials and issue a session token.
pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<Json<Response>> {
    let accounts = AccountRepository::new(state.db.sqlite.clone());

    let Some(account) = accounts.find_by_email(&body.email).await? else {
        return Err(ServerError::UnknownUser);
    };

    if !crate::crypto::verify(&body.password, &account.password)? {
        return Err(ServerError::WrongPassword);
    }

    let token = state.token.create(&account)?;
    tracing::info!(account_id = account.id, "login successful");

    Ok(Json(Response { token }))
}
