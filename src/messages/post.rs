use axum::{
    debug_handler,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;

use crate::{participants::is_registered, AppError, AppResult, User};

use super::msg::{insert_message, Draft, MessageBody};

#[debug_handler]
pub(crate) async fn post_message(
    State(db_pool): State<SqlitePool>,
    User(sender): User,
    body: Result<Json<MessageBody>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(body) = body?;
    let Draft { to, text, kind } = Draft::try_from(body)?;

    if !is_registered(&db_pool, &sender).await? {
        return Err(AppError::UnprocessableSender);
    }

    let id = insert_message(&db_pool, &sender, &to, &text, kind).await?;
    tracing::debug!(%id, from = %sender, %to, %kind, "message posted");

    Ok(StatusCode::CREATED)
}
