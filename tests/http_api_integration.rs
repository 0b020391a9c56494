//! End-to-end HTTP tests driving a live server over the in-memory
//! repository.
//!
//! Each test spawns its own server on an ephemeral port so state never
//! leaks between scenarios.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code indexes JSON arrays after length checks"
)]

use mockable::DefaultClock;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tasklist::http::{AllowedOrigins, AppState, ServerConfig, build_router, start};
use tasklist::task::adapters::memory::InMemoryTaskRepository;
use tasklist::task::services::TaskService;

/// Starts a fresh server and returns its base URL.
async fn spawn_server() -> String {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let service = Arc::new(TaskService::new(repository, Arc::new(DefaultClock)));
    let router = build_router(AppState::new(service));

    let config = ServerConfig {
        bind: SocketAddr::from(([127, 0, 0, 1], 0)),
        allowed_origins: AllowedOrigins::Any,
    };
    let handle = start(config, router).await.expect("server should start");
    format!("http://{}", handle.local_addr())
}

async fn create_task(client: &reqwest::Client, base: &str, body: &Value) -> Value {
    let response = client
        .post(format!("{base}/api/tasks"))
        .json(body)
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 201);
    response.json().await.expect("JSON response body")
}

#[tokio::test(flavor = "multi_thread")]
async fn create_returns_201_and_defaults_status() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let created = create_task(
        &client,
        &base,
        &json!({"title": "Buy milk", "description": "2%", "status": null}),
    )
    .await;

    assert_eq!(created["status"], json!("PENDING"));
    assert_eq!(created["title"], json!("Buy milk"));
    assert_eq!(created["description"], json!("2%"));
    assert!(created["id"].as_i64().is_some());
    assert_eq!(created["createdAt"], created["updatedAt"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_then_get_round_trips() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let created = create_task(&client, &base, &json!({"title": "Write report"})).await;
    let id = created["id"].as_i64().expect("assigned id");

    let response = client
        .get(format!("{base}/api/tasks/{id}"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 200);

    let fetched: Value = response.json().await.expect("JSON response body");
    assert_eq!(fetched, created);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_missing_task_returns_404_envelope() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/api/tasks/999"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 404);

    let envelope: Value = response.json().await.expect("JSON error body");
    assert_eq!(envelope["status"], json!(404));
    assert_eq!(envelope["error"], json!("Not Found"));
    assert_eq!(envelope["path"], json!("/api/tasks/999"));
    assert!(
        envelope["message"]
            .as_str()
            .expect("message present")
            .contains("999")
    );
    assert!(envelope.get("validationErrors").is_none());
    assert!(envelope.get("timestamp").is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn validation_failure_aggregates_all_fields() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/tasks"))
        .json(&json!({"title": "ab", "description": "d".repeat(501)}))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 400);

    let envelope: Value = response.json().await.expect("JSON error body");
    let details = envelope["validationErrors"]
        .as_array()
        .expect("validation details present");
    assert_eq!(details.len(), 2);

    let fields: Vec<&str> = details
        .iter()
        .filter_map(|detail| detail["field"].as_str())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"description"));
    assert_eq!(details[0]["rejectedValue"], json!("ab"));
}

#[tokio::test(flavor = "multi_thread")]
async fn title_and_description_boundaries_are_inclusive() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    for (title, description, expected) in [
        ("a".repeat(3), "d".repeat(500), 201_u16),
        ("a".repeat(100), String::new(), 201_u16),
        ("a".repeat(2), String::new(), 400_u16),
        ("a".repeat(101), String::new(), 400_u16),
        ("a".repeat(10), "d".repeat(501), 400_u16),
    ] {
        let mut body = json!({"title": title});
        if !description.is_empty() {
            body["description"] = json!(description);
        }
        let response = client
            .post(format!("{base}/api/tasks"))
            .json(&body)
            .send()
            .await
            .expect("request should succeed");
        assert_eq!(response.status().as_u16(), expected);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_status_token_names_allowed_values() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/tasks"))
        .json(&json!({"title": "Valid title", "status": "CANCELLED"}))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 400);

    let envelope: Value = response.json().await.expect("JSON error body");
    let message = envelope["message"].as_str().expect("message present");
    assert!(message.contains("PENDING"));
    assert!(message.contains("IN_PROGRESS"));
    assert!(message.contains("DONE"));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_fields_and_keeps_status_when_omitted() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let created = create_task(
        &client,
        &base,
        &json!({"title": "Original", "description": "Before", "status": "IN_PROGRESS"}),
    )
    .await;
    let id = created["id"].as_i64().expect("assigned id");

    let response = client
        .put(format!("{base}/api/tasks/{id}"))
        .json(&json!({"title": "Renamed"}))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 200);

    let updated: Value = response.json().await.expect("JSON response body");
    assert_eq!(updated["title"], json!("Renamed"));
    // Omitted description clears the field; omitted status is preserved.
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["status"], json!("IN_PROGRESS"));
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_status_overwrites_it() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let created = create_task(&client, &base, &json!({"title": "Some work"})).await;
    let id = created["id"].as_i64().expect("assigned id");

    let response = client
        .put(format!("{base}/api/tasks/{id}"))
        .json(&json!({"title": "Some work", "status": "DONE"}))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 200);

    let updated: Value = response.json().await.expect("JSON response body");
    assert_eq!(updated["status"], json!("DONE"));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_missing_task_returns_404() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{base}/api/tasks/424242"))
        .json(&json!({"title": "Ghost task"}))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_returns_204_then_404() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let created = create_task(&client, &base, &json!({"title": "Disposable"})).await;
    let id = created["id"].as_i64().expect("assigned id");

    let response = client
        .delete(format!("{base}/api/tasks/{id}"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 204);
    assert!(
        response
            .text()
            .await
            .expect("response body")
            .is_empty()
    );

    let fetch = client
        .get(format!("{base}/api/tasks/{id}"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(fetch.status().as_u16(), 404);

    let second_delete = client
        .delete(format!("{base}/api/tasks/{id}"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(second_delete.status().as_u16(), 404);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_all_returns_newest_first() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let first = create_task(&client, &base, &json!({"title": "Task A"})).await;
    let second = create_task(&client, &base, &json!({"title": "Task B"})).await;
    let third = create_task(&client, &base, &json!({"title": "Task C"})).await;

    let response = client
        .get(format!("{base}/api/tasks"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 200);

    let listed: Vec<Value> = response.json().await.expect("JSON response body");
    let ids: Vec<i64> = listed
        .iter()
        .filter_map(|task| task["id"].as_i64())
        .collect();
    assert_eq!(
        ids,
        vec![
            third["id"].as_i64().expect("id"),
            second["id"].as_i64().expect("id"),
            first["id"].as_i64().expect("id"),
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn list_by_status_filters_exactly() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    create_task(&client, &base, &json!({"title": "Pending task"})).await;
    let active = create_task(
        &client,
        &base,
        &json!({"title": "Active task", "status": "IN_PROGRESS"}),
    )
    .await;

    let response = client
        .get(format!("{base}/api/tasks/status/IN_PROGRESS"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 200);

    let listed: Vec<Value> = response.json().await.expect("JSON response body");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], active["id"]);

    // The path token is parsed case-insensitively.
    let lowercase = client
        .get(format!("{base}/api/tasks/status/in_progress"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(lowercase.status().as_u16(), 200);

    let empty = client
        .get(format!("{base}/api/tasks/status/DONE"))
        .send()
        .await
        .expect("request should succeed");
    let done_tasks: Vec<Value> = empty.json().await.expect("JSON response body");
    assert!(done_tasks.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_status_token_returns_400() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/api/tasks/status/NOT_A_STATUS"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 400);

    let envelope: Value = response.json().await.expect("JSON error body");
    let message = envelope["message"].as_str().expect("message present");
    assert!(message.contains("NOT_A_STATUS"));
    assert!(message.contains("PENDING"));
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_id_parameter_returns_400() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/api/tasks/not-a-number"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 400);

    let envelope: Value = response.json().await.expect("JSON error body");
    assert!(
        envelope["message"]
            .as_str()
            .expect("message present")
            .contains("'id'")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unmapped_route_returns_404_envelope() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/api/unknown"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 404);

    let envelope: Value = response.json().await.expect("JSON error body");
    assert_eq!(envelope["status"], json!(404));
    assert_eq!(envelope["path"], json!("/api/unknown"));
}
