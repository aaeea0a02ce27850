use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
};
use sqlx::SqlitePool;

use crate::{AppError, AppResult, User};

use super::msg::author_of;

#[debug_handler]
pub(crate) async fn delete_message(
    State(db_pool): State<SqlitePool>,
    Path(id): Path<String>,
    User(requester): User,
) -> AppResult<StatusCode> {
    let author = author_of(&db_pool, &id).await?.ok_or(AppError::NotFound)?;
    if author != requester {
        return Err(AppError::Unauthorized);
    }

    let deleted = sqlx::query("DELETE FROM messages WHERE id=? AND sender=?")
        .bind(&id)
        .bind(&requester)
        .execute(&db_pool)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    tracing::debug!(%id, "message deleted");
    Ok(StatusCode::OK)
}
