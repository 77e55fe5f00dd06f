//! HTTP routes.

pub mod favorites;
pub mod login;
pub mod register;
pub mod users;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::ServerError;

/// JSON extractor running `validator` rules.
///
/// Body rejections and failed rules both map to a 400 response.
pub struct Valid<T>(pub T);

impl<T, S> FromRequest<S> for Valid<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ServerError;

    async fn from_request(
        req: Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[cfg(test)]
pub(crate) const TEST_SECRET: &str = "secret-for-tests";

/// Build an [`crate::AppState`] over an in-memory store.
#[cfg(test)]
pub(crate) async fn state() -> crate::AppState {
    let db = crate::database::Database::new("sqlite::memory:", 1)
        .await
        .expect("cannot open in-memory database");
    db.create_tables().await.expect("cannot create tables");

    crate::AppState {
        config: std::sync::Arc::new(crate::config::Configuration::default()),
        db,
        token: crate::token::TokenManager::new(TEST_SECRET),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;

    use crate::{app, make_request, router};

    /// Full scenario: register, login, favorite, unfavorite.
    #[tokio::test]
    async fn test_end_to_end_flow() {
        let state = router::state().await;
        let app = app(state.clone());

        let body =
            json!({ "username": "alice", "email": "a@x.com", "password": "pw" });
        let response = make_request(
            app.clone(),
            Method::POST,
            "/register",
            body.to_string(),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json!({ "email": "a@x.com", "password": "pw" });
        let response = make_request(
            app.clone(),
            Method::POST,
            "/login",
            body.to_string(),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: router::login::Response =
            serde_json::from_slice(&body).unwrap();
        let alice_id: i64 = state
            .token
            .decode(&body.token)
            .unwrap()
            .sub
            .parse()
            .unwrap();

        let body = json!({ "email": "a@x.com", "password": "wrong" });
        let response = make_request(
            app.clone(),
            Method::POST,
            "/login",
            body.to_string(),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = json!({ "userId": alice_id, "movieId": "tt0111161" });
        let response = make_request(
            app.clone(),
            Method::POST,
            "/addFavorite",
            body.to_string(),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let path = format!("/getFavorites/{alice_id}");
        let response =
            make_request(app.clone(), Method::GET, &path, String::default(), None)
                .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: router::favorites::Response =
            serde_json::from_slice(&body).unwrap();
        assert_eq!(body.favorites, vec!["tt0111161".to_owned()]);

        let body = json!({ "userId": alice_id, "movieId": "tt0111161" });
        let response = make_request(
            app.clone(),
            Method::POST,
            "/removeFavorite",
            body.to_string(),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response =
            make_request(app, Method::GET, &path, String::default(), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: router::favorites::Response =
            serde_json::from_slice(&body).unwrap();
        assert!(body.favorites.is_empty());
    }
}
