use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    db::{self, MessageKind},
    sanitize::sanitize,
    AppError, AppResult,
};

/// Body of `POST /messages` and `PUT /messages/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub(crate) struct MessageBody {
    #[validate(length(min = 1, message = "\"to\" is not allowed to be empty"))]
    to: String,
    #[validate(length(min = 1, message = "\"text\" is not allowed to be empty"))]
    text: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "client_kind"))]
    kind: String,
}

// status messages are only ever written by the server
fn client_kind(kind: &str) -> Result<(), ValidationError> {
    match kind.parse() {
        Ok(MessageKind::Message | MessageKind::PrivateMessage) => Ok(()),
        _ => Err(ValidationError::new("type")
            .with_message("\"type\" must be one of [message, private_message]".into())),
    }
}

/// A sanitized, validated message body.
#[derive(Debug)]
pub(crate) struct Draft {
    pub(crate) to: String,
    pub(crate) text: String,
    pub(crate) kind: MessageKind,
}

impl TryFrom<MessageBody> for Draft {
    type Error = AppError;

    fn try_from(body: MessageBody) -> AppResult<Draft> {
        let body = MessageBody {
            to: sanitize(&body.to),
            text: sanitize(&body.text),
            kind: sanitize(&body.kind),
        };
        body.validate()?;

        let kind = body
            .kind
            .parse()
            .map_err(|err: db::UnknownKind| AppError::Validation(vec![err.to_string()]))?;

        Ok(Draft { to: body.to, text: body.text, kind })
    }
}

pub(crate) async fn insert_message(
    db_pool: &SqlitePool,
    from: &str,
    to: &str,
    text: &str,
    kind: MessageKind,
) -> AppResult<Uuid> {
    let id = Uuid::now_v7();
    sqlx::query("INSERT INTO messages (id,sender,recipient,text,kind,time) VALUES (?,?,?,?,?,?)")
        .bind(id.to_string())
        .bind(from)
        .bind(to)
        .bind(text)
        .bind(kind.as_str())
        .bind(db::time_of_day())
        .execute(db_pool)
        .await?;

    Ok(id)
}

/// Author of the message, if it exists.
pub(crate) async fn author_of(db_pool: &SqlitePool, id: &str) -> AppResult<Option<String>> {
    let author: Option<(String,)> = sqlx::query_as("SELECT sender FROM messages WHERE id=?")
        .bind(id)
        .fetch_optional(db_pool)
        .await?;

    Ok(author.map(|(author,)| author))
}
