use axum::{debug_handler, extract::State, Json};
use sqlx::SqlitePool;

use crate::{db::Participant, AppResult};

#[debug_handler]
pub(crate) async fn list_participants(
    State(db_pool): State<SqlitePool>,
) -> AppResult<Json<Vec<Participant>>> {
    let participants = sqlx::query_as("SELECT name,last_status FROM participants ORDER BY id")
        .fetch_all(&db_pool)
        .await?;

    Ok(Json(participants))
}
