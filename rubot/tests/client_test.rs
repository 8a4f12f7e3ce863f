//! HTTP-level tests for the client and the poll step, against a mockito
//! server: request paths (`/<token>/<method>`), payload shape, error mapping,
//! and the offset round-trip.

use std::sync::Arc;

use mockito::Matcher;
use serde_json::json;

use rubot::{OffsetStore, Robot, RobotConfig, RubotError};

const TEST_TOKEN: &str = "test_token";

fn bot_for(server: &mockito::ServerGuard) -> Robot {
    let mut config = RobotConfig::new(TEST_TOKEN);
    config.api_url = server.url();
    Robot::new(config).expect("client must build")
}

/// **Test: send_message POSTs to `/<token>/sendMessage` with the chat id and
/// text, and returns the raw response record.**
#[tokio::test]
async fn send_message_posts_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", format!("/{TEST_TOKEN}/sendMessage").as_str())
        .match_body(Matcher::PartialJson(json!({
            "chat_id": "u0abc",
            "text": "hi",
            "disable_notification": false,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "OK", "data": {"message_update": {"message_id": "m1"}}}"#)
        .create_async()
        .await;

    let bot = bot_for(&server);
    let response = bot.send_message("u0abc", "hi").await.unwrap();

    assert_eq!(
        response.pointer("/data/message_update/message_id").and_then(|v| v.as_str()),
        Some("m1")
    );
    mock.assert_async().await;
}

/// **Test: get_updates parses the batch and the next offset.**
#[tokio::test]
async fn get_updates_parses_batch() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", format!("/{TEST_TOKEN}/getUpdates").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "status": "OK",
                "data": {
                    "updates": [
                        {"type": "NewMessage", "object_guid": "u0abc",
                         "new_message": {"message_id": "m1", "text": "hi"}}
                    ],
                    "next_offset_id": "42"
                }
            }"#,
        )
        .create_async()
        .await;

    let bot = bot_for(&server);
    let batch = bot.get_updates(None, Some(50)).await.unwrap();

    assert_eq!(batch.updates.len(), 1);
    assert_eq!(batch.next_offset_id.as_deref(), Some("42"));
}

/// **Test: a poll persists the next offset, and the following poll requests
/// from that offset — including across a client restart.**
#[tokio::test]
async fn poll_once_round_trips_offset() {
    let mut server = mockito::Server::new_async().await;
    let first_poll = server
        .mock("POST", format!("/{TEST_TOKEN}/getUpdates").as_str())
        .match_body(Matcher::Json(json!({"limit": 50})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "OK", "data": {"updates": [], "next_offset_id": "12345"}}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = OffsetStore::at(dir.path().join("offset.txt"));

    let bot = bot_for(&server);
    let handlers = Arc::new(bot.handlers().clone());
    let mut offset = store.load();
    assert_eq!(offset, None);

    bot.poll_once(&handlers, &store, &mut offset).await.unwrap();
    assert_eq!(offset.as_deref(), Some("12345"));
    assert_eq!(store.load().as_deref(), Some("12345"));
    first_poll.assert_async().await;

    // Restart: a fresh store over the same file resumes from "12345".
    let second_poll = server
        .mock("POST", format!("/{TEST_TOKEN}/getUpdates").as_str())
        .match_body(Matcher::Json(json!({"offset_id": "12345", "limit": 50})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "OK", "data": {"updates": []}}"#)
        .create_async()
        .await;

    let store = OffsetStore::at(dir.path().join("offset.txt"));
    let mut offset = store.load();
    bot.poll_once(&handlers, &store, &mut offset).await.unwrap();

    // No next offset in the response: the cursor stays put.
    assert_eq!(offset.as_deref(), Some("12345"));
    second_poll.assert_async().await;
}

/// **Test: get_name reads the first name out of the typed chat record.**
#[tokio::test]
async fn get_name_parses_chat_record() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", format!("/{TEST_TOKEN}/getChat").as_str())
        .match_body(Matcher::Json(json!({"chat_id": "u0abc"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"status": "OK", "data": {"chat_id": "u0abc", "chat_type": "User",
                "first_name": "Ali", "username": "ali_dev"}}"#,
        )
        .create_async()
        .await;

    let bot = bot_for(&server);
    assert_eq!(bot.get_name("u0abc").await.unwrap().as_deref(), Some("Ali"));
}

/// **Test: a non-success status surfaces as the uniform request-failure
/// signal.**
#[tokio::test]
async fn error_status_maps_to_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", format!("/{TEST_TOKEN}/sendMessage").as_str())
        .with_status(500)
        .create_async()
        .await;

    let bot = bot_for(&server);
    let err = bot.send_message("u0abc", "hi").await.unwrap_err();
    assert!(matches!(err, RubotError::Api(_)), "got: {err:?}");
}

/// **Test: a non-JSON body surfaces as InvalidResponse with the body
/// attached.**
#[tokio::test]
async fn invalid_json_maps_to_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", format!("/{TEST_TOKEN}/sendMessage").as_str())
        .with_status(200)
        .with_body("<html>gateway error</html>")
        .create_async()
        .await;

    let bot = bot_for(&server);
    let err = bot.send_message("u0abc", "hi").await.unwrap_err();
    match err {
        RubotError::InvalidResponse { method, body } => {
            assert_eq!(method, "sendMessage");
            assert!(body.contains("gateway error"));
        }
        other => panic!("expected InvalidResponse, got {other:?}"),
    }
}

/// **Test: the blocking variant works outside an async runtime.**
#[test]
fn get_updates_sync_works_without_runtime() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", format!("/{TEST_TOKEN}/getUpdates").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "OK", "data": {"updates": [], "next_offset_id": "7"}}"#)
        .create();

    let mut config = RobotConfig::new(TEST_TOKEN);
    config.api_url = server.url();
    let bot = Robot::new(config).unwrap();

    let batch = bot.get_updates_sync(None, None).unwrap();
    assert_eq!(batch.next_offset_id.as_deref(), Some("7"));
}
