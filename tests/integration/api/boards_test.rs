//! Board and list API integration tests
//!
//! Tests for board CRUD, list reads and the ownership checks in front of
//! them.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use workboard::backend::error::StoreError;
use workboard::backend::policy::{OwnershipStore, ResourceKind};

use crate::common::*;

/// Ownership store whose every lookup fails
struct UnavailableOwnership;

#[async_trait]
impl OwnershipStore for UnavailableOwnership {
    async fn owns(&self, _kind: ResourceKind, _resource_id: i64, _owner_id: i64) -> Result<bool, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

async fn create_board(app: &TestApp, cookie: &str, name: &str) -> i64 {
    let response = app
        .post("/boards", Some(cookie), json!({ "name": name, "description": "things to do" }))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_boards_require_authentication() {
    let app = TestApp::new();

    for response in [
        app.get("/boards", None).await,
        app.post("/boards", None, json!({ "name": "Roadmap" })).await,
        app.get("/boards/1", None).await,
        app.delete("/boards/1", None).await,
        app.get("/boards/1/lists", None).await,
    ] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.error(), "unauthenticated");
    }
}

#[tokio::test]
async fn test_board_crud() {
    let app = TestApp::new();
    let (user_id, cookie) = signed_in_user(&app, "Ann", "ann@example.com").await;

    let created = app
        .post("/boards", Some(&cookie), json!({ "name": "  Roadmap ", "description": "Q3" }))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["name"], "Roadmap");
    assert_eq!(created.body["description"], "Q3");
    assert_eq!(created.body["user_id"], user_id);
    let id = created.body["id"].as_i64().unwrap();

    let listed = app.get("/boards", Some(&cookie)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let shown = app.get(&format!("/boards/{id}"), Some(&cookie)).await;
    assert_eq!(shown.status, StatusCode::OK);
    assert_eq!(shown.body["id"], id);

    let updated = app
        .put(&format!("/boards/{id}"), Some(&cookie), json!({ "name": "Backlog", "description": "  " }))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["name"], "Backlog");
    assert!(updated.body["description"].is_null());

    let deleted = app.delete(&format!("/boards/{id}"), Some(&cookie)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_null());

    let gone = app.get(&format!("/boards/{id}"), Some(&cookie)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.error(), "board not found");
}

#[tokio::test]
async fn test_board_validation() {
    let app = TestApp::new();
    let (_, cookie) = signed_in_user(&app, "Ann", "ann@example.com").await;

    let blank = app.post("/boards", Some(&cookie), json!({ "name": "   " })).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.error(), "name is a required field");

    let long = app
        .post("/boards", Some(&cookie), json!({ "name": "x".repeat(256) }))
        .await;
    assert_eq!(long.status, StatusCode::BAD_REQUEST);
    assert_eq!(long.error(), "name must not be more than 255 characters long");
}

#[tokio::test]
async fn test_invalid_board_id() {
    let app = TestApp::new();
    let (_, cookie) = signed_in_user(&app, "Ann", "ann@example.com").await;

    for uri in ["/boards/abc", "/boards/0", "/boards/-4"] {
        let response = app.get(uri, Some(&cookie)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error(), "invalid board id");
    }
}

#[tokio::test]
async fn test_other_users_board_is_not_found() {
    let app = TestApp::new();
    let (_, ann) = signed_in_user(&app, "Ann", "ann@example.com").await;
    let (_, bob) = signed_in_user(&app, "Bob", "bob@example.com").await;
    let board = create_board(&app, &ann, "Private").await;

    let uri = format!("/boards/{board}");
    let shown = app.get(&uri, Some(&bob)).await;
    let updated = app.put(&uri, Some(&bob), json!({ "name": "Mine now" })).await;
    let deleted = app.delete(&uri, Some(&bob)).await;
    let missing = app.get("/boards/999", Some(&bob)).await;

    for response in [shown, updated, deleted, missing] {
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, json!({ "error": "board not found", "status": 404 }));
    }

    let listed = app.get("/boards", Some(&bob)).await;
    assert_eq!(listed.body, json!([]));

    let still_there = app.get(&uri, Some(&ann)).await;
    assert_eq!(still_there.status, StatusCode::OK);
    assert_eq!(still_there.body["name"], "Private");
}

#[tokio::test]
async fn test_lists_of_a_board() {
    let app = TestApp::new();
    let (_, cookie) = signed_in_user(&app, "Ann", "ann@example.com").await;
    let board = create_board(&app, &cookie, "Roadmap").await;
    let todo = app.workspace.insert_list(board, "Todo").unwrap();
    app.workspace.insert_list(board, "Done").unwrap();

    let lists = app.get(&format!("/boards/{board}/lists"), Some(&cookie)).await;
    assert_eq!(lists.status, StatusCode::OK);
    let names: Vec<&str> = lists
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|list| list["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Todo", "Done"]);

    let shown = app
        .get(&format!("/boards/{board}/lists/{}", todo.id), Some(&cookie))
        .await;
    assert_eq!(shown.status, StatusCode::OK);
    assert_eq!(shown.body["name"], "Todo");
    assert_eq!(shown.body["board_id"], board);
    assert_eq!(shown.body["position"], 0);
}

#[tokio::test]
async fn test_list_under_wrong_board_is_not_found() {
    let app = TestApp::new();
    let (_, cookie) = signed_in_user(&app, "Ann", "ann@example.com").await;
    let first = create_board(&app, &cookie, "First").await;
    let second = create_board(&app, &cookie, "Second").await;
    let list = app.workspace.insert_list(first, "Todo").unwrap();

    let response = app
        .get(&format!("/boards/{second}/lists/{}", list.id), Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "list not found");
}

#[tokio::test]
async fn test_other_users_list_is_not_found() {
    let app = TestApp::new();
    let (_, ann) = signed_in_user(&app, "Ann", "ann@example.com").await;
    let (_, bob) = signed_in_user(&app, "Bob", "bob@example.com").await;
    let board = create_board(&app, &ann, "Private").await;
    let list = app.workspace.insert_list(board, "Todo").unwrap();

    let lists = app.get(&format!("/boards/{board}/lists"), Some(&bob)).await;
    assert_eq!(lists.status, StatusCode::NOT_FOUND);
    assert_eq!(lists.error(), "board not found");

    let shown = app
        .get(&format!("/boards/{board}/lists/{}", list.id), Some(&bob))
        .await;
    assert_eq!(shown.status, StatusCode::NOT_FOUND);
    assert_eq!(shown.error(), "list not found");

    let bad_id = app.get(&format!("/boards/{board}/lists/x"), Some(&ann)).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.error(), "invalid list id");
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = TestApp::new();

    let response = app.get("/nowhere", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "error": "not found", "status": 404 }));
}

#[tokio::test]
async fn test_ownership_lookup_failure_is_internal_error() {
    let app = TestApp::with_ownership(Arc::new(UnavailableOwnership));
    let (_, cookie) = signed_in_user(&app, "Ann", "ann@example.com").await;

    for response in [
        app.get("/boards/1", Some(&cookie)).await,
        app.put("/boards/1", Some(&cookie), json!({ "name": "Renamed" })).await,
        app.delete("/boards/1", Some(&cookie)).await,
        app.get("/boards/1/lists", Some(&cookie)).await,
        app.get("/boards/1/lists/1", Some(&cookie)).await,
    ] {
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, json!({ "error": "internal server error", "status": 500 }));
    }

    let created = app.post("/boards", Some(&cookie), json!({ "name": "Roadmap" })).await;
    assert_eq!(created.status, StatusCode::CREATED);
}
