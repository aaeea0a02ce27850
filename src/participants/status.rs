use axum::{debug_handler, extract::State, http::StatusCode};
use sqlx::SqlitePool;

use crate::{db, AppError, AppResult, User};

#[debug_handler]
pub(crate) async fn heartbeat(
    State(db_pool): State<SqlitePool>,
    User(name): User,
) -> AppResult<StatusCode> {
    let updated = sqlx::query("UPDATE participants SET last_status=? WHERE name=?")
        .bind(db::now_millis())
        .bind(&name)
        .execute(&db_pool)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(StatusCode::OK)
}
