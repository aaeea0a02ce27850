mod list;
mod register;
mod status;
mod sweep;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;

use crate::{AppResult, AppState};

pub use sweep::{spawn_sweeper, sweep};

pub(crate) const JOIN_TEXT: &str = "entra na sala...";
pub(crate) const LEAVE_TEXT: &str = "sai da sala...";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/participants", get(list::list_participants).post(register::register))
        .route("/status", post(status::heartbeat))
}

pub(crate) async fn is_registered(db_pool: &SqlitePool, name: &str) -> AppResult<bool> {
    let found = sqlx::query("SELECT 1 FROM participants WHERE name=?")
        .bind(name)
        .fetch_optional(db_pool)
        .await?;

    Ok(found.is_some())
}
