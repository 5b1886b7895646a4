mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use common::{
    bearer, create_task, list_tasks, send, spawn_app, toggle_task, token_for, TEST_SECRET,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use taskvault::auth::TokenKeys;

fn task_id(body: &Value) -> String {
    body["task"]["id"]
        .as_i64()
        .expect("created task has an id")
        .to_string()
}

#[test_log::test(actix_web::test)]
async fn test_buy_milk_flow() {
    let (app, _pool) = spawn_app().await;
    let token = token_for(&app, "alice", "pw1").await;

    let (status, body) = create_task(
        &app,
        &token,
        json!({ "description": "buy milk", "priority": "low" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Body: {}", body);
    assert_eq!(body["message"], "Task created successfully");
    assert_eq!(body["task"]["description"], "buy milk");
    assert_eq!(body["task"]["priority"], "low");
    assert_eq!(body["task"]["completed"], false);
    assert!(body["task"]["created_at"].is_string());
    assert!(body["task"]["updated_at"].is_string());
    let id = task_id(&body);

    let (status, body) = toggle_task(&app, &token, &id).await;
    assert_eq!(status, StatusCode::OK, "Body: {}", body);
    assert_eq!(body, json!({ "message": "Task completion toggled" }));

    let (status, body) = list_tasks(&app, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["tasks"][0]["id"].to_string(), id);
    assert_eq!(body["tasks"][0]["completed"], true);

    // A second toggle undoes the first.
    assert_eq!(toggle_task(&app, &token, &id).await.0, StatusCode::OK);
    let (_, body) = list_tasks(&app, &token).await;
    assert_eq!(body["tasks"][0]["completed"], false);
}

#[test_log::test(actix_web::test)]
async fn test_toggle_keeps_timestamps() {
    let (app, _pool) = spawn_app().await;
    let token = token_for(&app, "alice", "pw1").await;

    let (_, body) = create_task(&app, &token, json!({ "description": "buy milk" })).await;
    let id = task_id(&body);
    let created = body["task"].clone();

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    assert_eq!(toggle_task(&app, &token, &id).await.0, StatusCode::OK);

    let (_, body) = list_tasks(&app, &token).await;
    let listed = &body["tasks"][0];
    assert_eq!(listed["completed"], true);
    assert_eq!(listed["updated_at"], created["updated_at"]);
    assert_eq!(listed["created_at"], created["created_at"]);
}

#[test_log::test(actix_web::test)]
async fn test_list_is_empty_for_new_user() {
    let (app, _pool) = spawn_app().await;
    let token = token_for(&app, "alice", "pw1").await;

    let (status, body) = list_tasks(&app, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "tasks": [], "count": 0 }));
}

#[test_log::test(actix_web::test)]
async fn test_priority_wire_format() {
    let (app, _pool) = spawn_app().await;
    let token = token_for(&app, "alice", "pw1").await;

    let cases = [
        (json!({ "description": "a" }), "notset"),
        (json!({ "description": "b", "priority": null }), "notset"),
        (json!({ "description": "c", "priority": "" }), "notset"),
        (json!({ "description": "d", "priority": "MEDIUM" }), "normal"),
        (json!({ "description": "e", "priority": "normal" }), "normal"),
        (json!({ "description": "f", "priority": "High" }), "high"),
    ];

    for (payload, expected) in &cases {
        let (status, body) = create_task(&app, &token, payload.clone()).await;
        assert_eq!(status, StatusCode::CREATED, "{} -> {}", payload, body);
        assert_eq!(body["task"]["priority"], *expected, "{}", payload);
    }

    let (_, body) = list_tasks(&app, &token).await;
    assert_eq!(body["count"], cases.len());
}

#[test_log::test(actix_web::test)]
async fn test_create_task_validation() {
    let (app, _pool) = spawn_app().await;
    let token = token_for(&app, "alice", "pw1").await;

    let (status, body) = create_task(&app, &token, json!({ "description": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Description is required" }));

    let (status, _) = create_task(&app, &token, json!({ "priority": "low" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = create_task(
        &app,
        &token,
        json!({ "description": "x", "priority": "urgent" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"].as_str().unwrap().contains("invalid priority value: urgent"),
        "{}",
        body
    );

    let (status, _) = create_task(
        &app,
        &token,
        json!({ "description": "a".repeat(1001) }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = list_tasks(&app, &token).await;
    assert_eq!(body["count"], 0);
}

#[test_log::test(actix_web::test)]
async fn test_owner_comes_from_token_not_body() {
    let (app, _pool) = spawn_app().await;
    let alice = token_for(&app, "alice", "pw1").await;
    let bob = token_for(&app, "bob", "pw2").await;

    let (_, alice_list) = list_tasks(&app, &alice).await;
    assert_eq!(alice_list["count"], 0);

    let (status, body) = create_task(
        &app,
        &bob,
        json!({ "description": "sneaky", "user_id": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body["task"]["user_id"], 1);

    let (_, alice_list) = list_tasks(&app, &alice).await;
    assert_eq!(alice_list["count"], 0);
}

#[test_log::test(actix_web::test)]
async fn test_users_are_isolated() {
    let (app, _pool) = spawn_app().await;
    let alice = token_for(&app, "alice", "pw1").await;
    let bob = token_for(&app, "bob", "pw2").await;

    let (_, body) = create_task(&app, &alice, json!({ "description": "alice's" })).await;
    let alice_task = task_id(&body);
    create_task(&app, &bob, json!({ "description": "bob's" })).await;

    let (_, body) = list_tasks(&app, &alice).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["tasks"][0]["description"], "alice's");

    let (_, body) = list_tasks(&app, &bob).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["tasks"][0]["description"], "bob's");

    // Bob cannot toggle Alice's task, and learns nothing about whether it exists.
    let (status, body) = toggle_task(&app, &bob, &alice_task).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Task not found" }));
    assert_eq!(toggle_task(&app, &bob, "999999").await, (status, body));

    let (_, body) = list_tasks(&app, &alice).await;
    assert_eq!(body["tasks"][0]["completed"], false);
}

#[test_log::test(actix_web::test)]
async fn test_toggle_with_bad_id() {
    let (app, _pool) = spawn_app().await;
    let token = token_for(&app, "alice", "pw1").await;

    let (status, body) = toggle_task(&app, &token, "abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid task ID" }));
}

#[test_log::test(actix_web::test)]
async fn test_delete_task() {
    let (app, _pool) = spawn_app().await;
    let token = token_for(&app, "alice", "pw1").await;
    let (_, body) = create_task(&app, &token, json!({ "description": "temp" })).await;
    let id = task_id(&body);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", id))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Task deleted successfully" }));

    let (_, body) = list_tasks(&app, &token).await;
    assert_eq!(body["count"], 0);

    // Deleting again is not an error.
    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", id))
        .to_request();
    assert_eq!(send(&app, req).await.0, StatusCode::OK);
}

#[test_log::test(actix_web::test)]
async fn test_delete_does_not_check_ownership() {
    let (app, _pool) = spawn_app().await;
    let alice = token_for(&app, "alice", "pw1").await;
    let (_, body) = create_task(&app, &alice, json!({ "description": "alice's" })).await;
    let id = task_id(&body);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", id))
        .to_request();
    assert_eq!(send(&app, req).await.0, StatusCode::OK);

    let (_, body) = list_tasks(&app, &alice).await;
    assert_eq!(body["count"], 0);
}

#[test_log::test(actix_web::test)]
async fn test_delete_with_bad_id_regardless_of_auth() {
    let (app, _pool) = spawn_app().await;
    let token = token_for(&app, "alice", "pw1").await;

    let anonymous = test::TestRequest::delete().uri("/api/tasks/abc").to_request();
    let (status, body) = send(&app, anonymous).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid task ID" }));

    let authenticated = test::TestRequest::delete()
        .uri("/api/tasks/abc")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(send(&app, authenticated).await.0, StatusCode::BAD_REQUEST);
}

#[test_log::test(actix_web::test)]
async fn test_protected_routes_require_token() {
    let (app, _pool) = spawn_app().await;
    let expired = TokenKeys::new(TEST_SECRET)
        .issue_at(1, Utc::now() - Duration::hours(3))
        .unwrap();
    let forged = TokenKeys::new("someone-elses-secret").issue(1).unwrap();

    for token in [None, Some(expired.as_str()), Some(forged.as_str()), Some("garbage")] {
        let requests = [
            test::TestRequest::get().uri("/api/tasks"),
            test::TestRequest::post()
                .uri("/api/tasks")
                .set_json(json!({ "description": "x" })),
            test::TestRequest::patch().uri("/api/tasks/1/toggle"),
        ];

        for mut req in requests {
            if let Some(token) = token {
                req = req.insert_header(bearer(token));
            }
            let (status, body) = send(&app, req.to_request()).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "token {:?}: {}", token, body);
            assert!(body["error"].is_string());
        }
    }
}
