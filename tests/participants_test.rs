mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{messages, pool, register, router, send};

#[tokio::test]
async fn test_register_same_name_twice() {
    let db_pool = pool().await;
    let app = router(&db_pool);

    let first = send(&app, "POST", "/participants", None, Some(json!({ "name": "Ana" }))).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = send(&app, "POST", "/participants", None, Some(json!({ "name": "Ana" }))).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert!(second.body.is_empty());

    let reply = send(&app, "GET", "/participants", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    let participants = reply.json();
    let participants = participants.as_array().unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0]["name"], "Ana");
    assert!(participants[0]["lastStatus"].is_i64());
    assert!(participants[0].get("id").is_none());
}

#[tokio::test]
async fn test_names_are_compared_after_sanitizing() {
    let db_pool = pool().await;
    let app = router(&db_pool);

    register(&app, "  <b>Ana</b> ").await;
    let reply = send(&app, "POST", "/participants", None, Some(json!({ "name": "Ana" }))).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);

    // case-sensitive
    register(&app, "ana").await;
}

#[tokio::test]
async fn test_block_markup_in_names_keeps_the_text() {
    let db_pool = pool().await;
    let app = router(&db_pool);

    register(&app, "<p>Bia</p>").await;
    register(&app, "<div>Caio</div>").await;

    let reply = send(&app, "GET", "/participants", None, None).await;
    let names: Vec<String> = reply
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, vec!["Bia", "Caio"]);
}

#[tokio::test]
async fn test_register_rejects_empty_names() {
    let db_pool = pool().await;
    let app = router(&db_pool);

    for body in [json!({ "name": "" }), json!({ "name": "  <br> " }), json!({})] {
        let reply = send(&app, "POST", "/participants", None, Some(body)).await;
        assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(reply.json(), json!(["\"name\" is not allowed to be empty"]));
    }

    let reply = send(&app, "GET", "/participants", None, None).await;
    assert_eq!(reply.json(), json!([]));
}

#[tokio::test]
async fn test_register_rejects_malformed_bodies() {
    let db_pool = pool().await;
    let app = router(&db_pool);

    let reply = send(&app, "POST", "/participants", None, Some(json!({ "name": 42 }))).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(reply.json().as_array().is_some_and(|errors| errors.len() == 1));
}

#[tokio::test]
async fn test_register_announces_the_newcomer() {
    let db_pool = pool().await;
    let app = router(&db_pool);

    register(&app, "Ana").await;

    let messages = messages(&app, "someone").await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["from"], "Ana");
    assert_eq!(messages[0]["to"], "Todos");
    assert_eq!(messages[0]["text"], "entra na sala...");
    assert_eq!(messages[0]["type"], "status");
    assert_eq!(messages[0]["time"].as_str().unwrap().len(), 8);
}

#[tokio::test]
async fn test_heartbeat() {
    let db_pool = pool().await;
    let app = router(&db_pool);

    let reply = send(&app, "POST", "/status", Some("Ana"), None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = send(&app, "POST", "/status", None, None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    register(&app, "Ana").await;
    sqlx::query("UPDATE participants SET last_status=0")
        .execute(&db_pool)
        .await
        .unwrap();

    let reply = send(&app, "POST", "/status", Some(" Ana "), None).await;
    assert_eq!(reply.status, StatusCode::OK);

    let (last_status,): (i64,) = sqlx::query_as("SELECT last_status FROM participants WHERE name='Ana'")
        .fetch_one(&db_pool)
        .await
        .unwrap();
    assert!(last_status > 0);
}
