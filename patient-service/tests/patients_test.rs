mod common;

use common::{TestApp, UNKNOWN_PATIENT_ID};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

async fn create_patient(client: &Client, app: &TestApp, body: Value) -> String {
    let response = client
        .post(format!("{}/patients", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    body["inserted_id"]
        .as_str()
        .expect("Missing inserted_id")
        .to_string()
}

#[tokio::test]
async fn create_then_list_includes_patient() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let id = create_patient(&client, &app, json!({ "name": "Alice", "age": 42 })).await;
    assert!(!id.is_empty());

    let response = client
        .get(format!("{}/patients", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let patients: Vec<Value> = response.json().await.expect("Failed to parse JSON");
    let found = patients
        .iter()
        .find(|p| p["id"] == id.as_str())
        .expect("Created patient missing from list");
    assert_eq!(found["name"], "Alice");
    assert_eq!(found["prescriptions"], json!([]));

    app.cleanup().await;
}

#[tokio::test]
async fn new_patient_starts_with_empty_prescriptions() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let id = create_patient(&client, &app, json!({ "name": "Alice" })).await;

    let response = client
        .get(format!("{}/patients/{}/prescriptions", app.address, id))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let prescriptions: Vec<Value> = response.json().await.expect("Failed to parse JSON");
    assert!(prescriptions.is_empty());

    app.cleanup().await;
}

#[tokio::test]
async fn create_ignores_caller_supplied_id() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let id = create_patient(
        &client,
        &app,
        json!({ "_id": "not-an-object-id", "name": "Mallory" }),
    )
    .await;

    // The server assigned its own id
    assert_ne!(id, "not-an-object-id");

    app.cleanup().await;
}

#[tokio::test]
async fn update_patient_sets_fields() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let id = create_patient(&client, &app, json!({ "name": "Alice", "ward": "A1" })).await;

    let response = client
        .put(format!("{}/patients/{}", app.address, id))
        .json(&json!({ "ward": "B2" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["matched_count"], 1);
    assert_eq!(body["modified_count"], 1);

    let patients: Vec<Value> = client
        .get(format!("{}/patients", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    let found = patients.iter().find(|p| p["id"] == id.as_str()).unwrap();
    assert_eq!(found["ward"], "B2");
    assert_eq!(found["name"], "Alice");

    app.cleanup().await;
}

#[tokio::test]
async fn update_unknown_patient_returns_404() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .put(format!("{}/patients/{}", app.address, UNKNOWN_PATIENT_ID))
        .json(&json!({ "name": "Nobody" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.cleanup().await;
}

#[tokio::test]
async fn update_with_malformed_id_returns_400() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .put(format!("{}/patients/not-a-hex-id", app.address))
        .json(&json!({ "name": "Nobody" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    app.cleanup().await;
}

#[tokio::test]
async fn update_rejects_id_mutation() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let id = create_patient(&client, &app, json!({ "name": "Alice" })).await;

    let response = client
        .put(format!("{}/patients/{}", app.address, id))
        .json(&json!({ "_id": UNKNOWN_PATIENT_ID }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    app.cleanup().await;
}

#[tokio::test]
async fn update_with_empty_body_returns_400() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let id = create_patient(&client, &app, json!({ "name": "Alice" })).await;

    let response = client
        .put(format!("{}/patients/{}", app.address, id))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    app.cleanup().await;
}

#[tokio::test]
async fn delete_patient_removes_it_from_list() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let id = create_patient(&client, &app, json!({ "name": "Alice" })).await;

    let response = client
        .delete(format!("{}/patients/{}", app.address, id))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["deleted_count"], 1);

    let patients: Vec<Value> = client
        .get(format!("{}/patients", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert!(patients.iter().all(|p| p["id"] != id.as_str()));

    app.cleanup().await;
}

#[tokio::test]
async fn delete_unknown_patient_still_returns_success() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .delete(format!("{}/patients/{}", app.address, UNKNOWN_PATIENT_ID))
        .send()
        .await
        .expect("Failed to execute request");

    // Unlike the other routes this one reports zero deletions, not a 404
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["deleted_count"], 0);

    app.cleanup().await;
}
