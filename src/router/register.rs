use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::account::AccountRepository;
use crate::error::{Result, ServerError};
use crate::router::Valid;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    pub username: String,
    pub email: String,
    // No complexity policy: any string is accepted as a password.
    pub password: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub message: String,
}

/// Handler to register an account.
pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<(StatusCode, Json<Response>)> {
    let accounts = AccountRepository::new(state.db.sqlite.clone());

    if accounts.find_by_email(&body.email).await?.is_some() {
        return Err(ServerError::EmailTaken);
    }

    let digest = crate::crypto::hash(&body.password)?;
    let id = accounts
        .insert(&body.username, &body.email, &digest)
        .await?;

    tracing::info!(account_id = id, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(Response {
            success: true,
            message: "account registered successfully".to_owned(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;

    use super::*;
    use crate::*;

    #[tokio::test]
    async fn test_register_handler() {
        let state = router::state().await;
        let app = app(state.clone());

        let req_body = json!({
            "username": "alice",
            "email": "alice@reelmark.example",
            "password": "pw",
        });
        let response = make_request(
            app,
            Method::POST,
            "/register",
            req_body.to_string(),
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Response = serde_json::from_slice(&body).unwrap();
        assert!(body.success);

        let account = AccountRepository::new(state.db.sqlite.clone())
            .find_by_email("alice@reelmark.example")
            .await
            .unwrap()
            .expect("account should be stored");
        assert_eq!(account.username, "alice");
        // only the digest is stored.
        assert_ne!(account.password, "pw");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let state = router::state().await;
        let app = app(state.clone());

        let req_body = json!({
            "username": "alice",
            "email": "alice@reelmark.example",
            "password": "pw",
        });
        let response = make_request(
            app.clone(),
            Method::POST,
            "/register",
            req_body.to_string(),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        // same email, different username.
        let req_body = json!({
            "username": "mallory",
            "email": "alice@reelmark.example",
            "password": "other",
        });
        let response = make_request(
            app,
            Method::POST,
            "/register",
            req_body.to_string(),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM accounts WHERE email = ?",
        )
        .bind("alice@reelmark.example")
        .fetch_one(&state.db.sqlite)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }
}
