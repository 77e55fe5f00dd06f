//! Reelmark is a small account and favorites API for a movie browser.

#[forbid(unsafe_code)]
#[deny(missing_docs, unused_mut)]
mod account;
mod crypto;
mod database;
pub mod error;
mod favorite;
mod router;
pub mod telemetry;
mod token;

pub mod config;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{Method, header};
use axum::routing::{get, post};
use axum::{Router, middleware as AxumMiddleware};
pub use error::ServerError;
use tower::ServiceBuilder;
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};

/// MUST NEVER be used in production.
#[cfg(test)]
pub async fn make_request(
    app: Router,
    method: Method,
    path: &str,
    body: String,
    token: Option<String>,
) -> axum::http::Response<axum::body::Body> {
    use axum::extract::Request;
    use tower::util::ServiceExt;

    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder =
            builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    app.oneshot(builder.body(axum::body::Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// State sharing between routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Configuration>,
    pub db: database::Database,
    pub token: token::TokenManager,
}

/// Create router.
pub fn app(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        // Add high level tracing/logging to all requests.
        .layer(
            TraceLayer::new_for_http()
                .on_body_chunk(|chunk: &Bytes, latency: Duration, _span: &tracing::Span| {
                    tracing::trace!(size_bytes = chunk.len(), latency = ?latency, "sending body chunk")
                })
                .make_span_with(DefaultMakeSpan::new().include_headers(true).level(tracing::Level::INFO))
                .on_request(DefaultOnRequest::new())
                .on_response(DefaultOnResponse::new().include_headers(true).latency_unit(LatencyUnit::Micros)),
        )
        // Set a timeout.
        .layer(TimeoutLayer::new(Duration::from_secs(10)))
        // Remove sensitive headers from trace.
        .layer(SetSensitiveHeadersLayer::new([header::AUTHORIZATION]))
        // Add CORS preflight support for the browser front end.
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any)
                .vary([header::AUTHORIZATION]),
        );

    // Diagnostic route, the only token-gated one.
    let users_router = Router::new()
        .route("/users", get(router::users::handler))
        .route_layer(AxumMiddleware::from_fn_with_state(
            state.clone(),
            router::users::auth,
        ));

    Router::new()
        // `POST /register` goes to `register`.
        .route("/register", post(router::register::handler))
        // `POST /login` goes to `login`.
        .route("/login", post(router::login::handler))
        // Favorites routes, keyed by the caller-supplied account id.
        .route("/addFavorite", post(router::favorites::add))
        .route("/removeFavorite", post(router::favorites::remove))
        .route("/getFavorites/{user_id}", get(router::favorites::list))
        .merge(users_router)
        .with_state(state)
        .layer(middleware)
}

/// Initialize the application state.
pub async fn initialize_state() -> Result<AppState, Box<dyn std::error::Error>>
{
    // read configuration file. let it in memory.
    let config = config::Configuration::default().read()?;

    let db = match config.sqlite {
        Some(ref cfg) => {
            database::Database::new(
                &cfg.path,
                cfg.pool_size.unwrap_or(database::DEFAULT_POOL_SIZE),
            )
            .await?
        },
        None => {
            tracing::error!("missing `sqlite` entry on `config.yaml` file");
            std::process::exit(1);
        },
    };

    // create tables on start.
    db.create_tables().await?;

    // handle session tokens. a missing secret is fatal.
    let Some(token) = &config.token else {
        tracing::error!("missing `token` entry on `config.yaml` file");
        std::process::exit(1);
    };
    if token.secret.is_empty() {
        tracing::error!("`token.secret` on `config.yaml` file is empty");
        std::process::exit(1);
    }
    let token = token::TokenManager::new(&token.secret);

    Ok(AppState { config, db, token })
}
