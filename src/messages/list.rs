use axum::{
    debug_handler,
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{db::Message, AppResult, User};

use super::{is_visible_to, parse_limit, tail};

#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    limit: Option<String>,
}

#[debug_handler]
pub(crate) async fn list_messages(
    State(db_pool): State<SqlitePool>,
    User(viewer): User,
    Query(ListQuery { limit }): Query<ListQuery>,
) -> AppResult<Json<Vec<Message>>> {
    let messages: Vec<Message> =
        sqlx::query_as("SELECT id,sender,recipient,text,kind,time FROM messages ORDER BY rowid")
            .fetch_all(&db_pool)
            .await?;

    let visible = messages
        .into_iter()
        .filter(|message| is_visible_to(message, &viewer))
        .collect();

    Ok(Json(tail(visible, limit.as_deref().and_then(parse_limit))))
}
