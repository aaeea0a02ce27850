use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, SqlitePool,
};
use thiserror::Error;
use time::OffsetDateTime;

/// Recipient that addresses everyone in the room.
pub const BROADCAST: &str = "Todos";

pub fn is_broadcast(to: &str) -> bool {
    to == BROADCAST || to == "all"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub name: String,
    /// Milliseconds since the Unix epoch.
    pub last_status: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Message,
    PrivateMessage,
    Status,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        use MessageKind::*;
        match self {
            Message => "message",
            PrivateMessage => "private_message",
            Status => "status",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("\"type\" must be one of [message, private_message]")]
pub struct UnknownKind(pub String);

impl FromStr for MessageKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(MessageKind::Message),
            "private_message" => Ok(MessageKind::PrivateMessage),
            "status" => Ok(MessageKind::Status),
            other => Err(UnknownKind(other.to_owned())),
        }
    }
}

impl TryFrom<String> for MessageKind {
    type Error = UnknownKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for MessageKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Message {
    pub id: String,
    #[sqlx(rename = "sender")]
    pub from: String,
    #[sqlx(rename = "recipient")]
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    #[sqlx(try_from = "String")]
    pub kind: MessageKind,
    pub time: String,
}

/// Opens the pool and creates the two collections if they are missing.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS participants (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            last_status INTEGER NOT NULL
        )",
    )
    .execute(&db_pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS messages (
            id TEXT PRIMARY KEY,
            sender TEXT NOT NULL,
            recipient TEXT NOT NULL,
            text TEXT NOT NULL,
            kind TEXT NOT NULL,
            time TEXT NOT NULL
        )",
    )
    .execute(&db_pool)
    .await?;

    Ok(db_pool)
}

pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// `HH:MM:SS` in local time, falling back to UTC when the offset is unknown.
pub fn time_of_day() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second())
}
