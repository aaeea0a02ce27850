pub mod appresult;
pub mod config;
pub mod db;
pub mod logging;
pub mod messages;
pub mod participants;
pub mod sanitize;

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    Router,
};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use appresult::{AppError, AppResult};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(participants::router())
        .merge(messages::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub const USER_HEADER: &str = "user";

/// Name the caller claims through the `user` header, sanitized.
///
/// Nothing is verified here; an absent or non UTF-8 header is the empty
/// name, which never matches a participant.
#[derive(Debug, Clone)]
pub struct User(pub String);

impl<S: Send + Sync> FromRequestParts<S> for User {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
            .map(sanitize::sanitize)
            .unwrap_or_default();

        Ok(User(name))
    }
}
