use axum::{
    debug_handler,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    db::{self, MessageKind, BROADCAST},
    messages::insert_message,
    sanitize::sanitize,
    AppError, AppResult,
};

use super::{is_registered, JOIN_TEXT};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub(crate) struct RegisterBody {
    #[validate(length(min = 1, message = "\"name\" is not allowed to be empty"))]
    name: String,
}

#[debug_handler]
pub(crate) async fn register(
    State(db_pool): State<SqlitePool>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(body) = body?;
    let body = RegisterBody { name: sanitize(&body.name) };
    body.validate()?;
    let RegisterBody { name } = body;

    if is_registered(&db_pool, &name).await? {
        return Err(AppError::Conflict);
    }

    // the UNIQUE constraint catches a concurrent registration that slipped past the check above
    let inserted = sqlx::query("INSERT INTO participants (name,last_status) VALUES (?,?)")
        .bind(&name)
        .bind(db::now_millis())
        .execute(&db_pool)
        .await;
    match inserted {
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            return Err(AppError::Conflict);
        }
        other => {
            other?;
        }
    }

    insert_message(&db_pool, &name, BROADCAST, JOIN_TEXT, MessageKind::Status).await?;
    tracing::info!(%name, "participant joined");

    Ok(StatusCode::CREATED)
}
