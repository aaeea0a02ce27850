use axum::{
    debug_handler,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;

use crate::{participants::is_registered, AppError, AppResult, User};

use super::msg::{author_of, Draft, MessageBody};

#[debug_handler]
pub(crate) async fn edit_message(
    State(db_pool): State<SqlitePool>,
    Path(id): Path<String>,
    User(requester): User,
    body: Result<Json<MessageBody>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(body) = body?;
    let Draft { to, text, kind } = Draft::try_from(body)?;

    if !is_registered(&db_pool, &requester).await? {
        return Err(AppError::UnprocessableSender);
    }

    let author = author_of(&db_pool, &id).await?.ok_or(AppError::NotFound)?;
    if author != requester {
        return Err(AppError::Unauthorized);
    }

    // zero rows means the message was deleted after the ownership check
    let updated = sqlx::query("UPDATE messages SET recipient=?,text=?,kind=? WHERE id=? AND sender=?")
        .bind(&to)
        .bind(&text)
        .bind(kind.as_str())
        .bind(&id)
        .bind(&requester)
        .execute(&db_pool)
        .await?;
    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(StatusCode::OK)
}
