#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use batepapo::{app, db, AppState};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt; // for `oneshot`

pub async fn pool() -> SqlitePool {
    // a single connection keeps the in-memory database alive and shared
    db::connect("sqlite::memory:", 1).await.unwrap()
}

pub fn router(db_pool: &SqlitePool) -> Router {
    app(AppState { db_pool: db_pool.clone() })
}

pub struct Reply {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        request = request.header("user", user);
    }
    let request = match body {
        Some(body) => request
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    Reply { status, body }
}

pub async fn register(app: &Router, name: &str) {
    let reply = send(app, "POST", "/participants", None, Some(serde_json::json!({ "name": name }))).await;
    assert_eq!(reply.status, StatusCode::CREATED, "registering {name}");
}

pub async fn post(app: &Router, from: &str, to: &str, text: &str, kind: &str) -> Reply {
    send(
        app,
        "POST",
        "/messages",
        Some(from),
        Some(serde_json::json!({ "to": to, "text": text, "type": kind })),
    )
    .await
}

pub async fn messages(app: &Router, viewer: &str) -> Vec<Value> {
    let reply = send(app, "GET", "/messages", Some(viewer), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.json().as_array().unwrap().clone()
}

/// Id of the newest message with the given text.
pub async fn id_of(app: &Router, viewer: &str, text: &str) -> String {
    messages(app, viewer)
        .await
        .iter()
        .rev()
        .find(|m| m["text"] == text)
        .map(|m| m["id"].as_str().unwrap().to_owned())
        .unwrap()
}
