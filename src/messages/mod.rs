mod delete;
mod edit;
mod list;
mod msg;
mod post;

use axum::{
    routing::{get, put},
    Router,
};

use crate::{
    db::{self, Message, MessageKind},
    AppState,
};

pub(crate) use msg::insert_message;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(list::list_messages).post(post::post_message))
        .route("/messages/{id}", put(edit::edit_message).delete(delete::delete_message))
}

/// Public and status messages are visible to everyone; private ones only to
/// their author, their recipient, or everyone when sent to the whole room.
pub fn is_visible_to(message: &Message, viewer: &str) -> bool {
    match message.kind {
        MessageKind::Message | MessageKind::Status => true,
        MessageKind::PrivateMessage => {
            message.from == viewer || message.to == viewer || db::is_broadcast(&message.to)
        }
    }
}

/// Reads `?limit=` the lenient way: any integral number counts, anything else
/// (including an empty value) means no limit.
pub fn parse_limit(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let limit: f64 = raw.parse().ok()?;
    (limit.is_finite() && limit.fract() == 0.0).then_some(limit as i64)
}

/// Keeps the last `limit` items; a non-positive limit keeps none.
pub fn tail<T>(mut items: Vec<T>, limit: Option<i64>) -> Vec<T> {
    let Some(limit) = limit else {
        return items;
    };

    let keep = limit.clamp(0, items.len() as i64) as usize;
    items.split_off(items.len() - keep)
}
