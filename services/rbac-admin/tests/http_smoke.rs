mod common;

use axum::http::StatusCode;
use common::{FlakyStore, TestApp, empty_request, json_request, memory_app, read_json};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn send(app: &TestApp, request: axum::http::Request<axum::body::Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    (status, read_json(response).await)
}

async fn list(app: &TestApp, resource: &str) -> Vec<Value> {
    let (status, body) = send(app, empty_request("GET", &format!("/api/{resource}/all"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    body["data"].as_array().expect("data array").clone()
}

async fn id_of(app: &TestApp, resource: &str, field: &str, value: &str) -> String {
    list(app, resource)
        .await
        .into_iter()
        .find(|item| item[field] == json!(value))
        .and_then(|item| item["_id"].as_str().map(str::to_string))
        .unwrap_or_else(|| panic!("{resource} {value} not listed"))
}

#[tokio::test]
async fn permission_role_lifecycle_scenario() {
    let app = memory_app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/permissions",
            json!({ "name": "read", "description": "Read access" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "success": true, "message": "Permission added" }));
    let read_id = id_of(&app, "permissions", "name", "read").await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/roles",
            json!({ "name": "viewer", "permissions": [read_id] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let roles = list(&app, "roles").await;
    assert_eq!(roles.len(), 1);
    assert_eq!(
        roles[0]["permissions"],
        json!([{ "_id": read_id, "name": "read" }])
    );
    let viewer_id = id_of(&app, "roles", "name", "viewer").await;

    let (status, body) = send(
        &app,
        empty_request("DELETE", &format!("/api/permissions/{read_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["message"],
        json!("Cannot delete permission as it is assigned to roles")
    );
    assert!(body.get("data").is_none());

    let (status, body) = send(
        &app,
        empty_request("DELETE", &format!("/api/roles/{viewer_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Role deleted"));

    let (status, body) = send(
        &app,
        empty_request("DELETE", &format!("/api/permissions/{read_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Permission deleted"));

    assert!(list(&app, "permissions").await.is_empty());
    assert!(list(&app, "roles").await.is_empty());
}

#[tokio::test]
async fn role_in_use_by_user_cannot_be_deleted() {
    let app = memory_app();
    send(&app, json_request("POST", "/api/roles", json!({ "name": "admin" }))).await;
    let admin_id = id_of(&app, "roles", "name", "admin").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            json!({ "name": "Ada", "email": "ada@example.com", "roles": [admin_id] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("User added"));

    let (status, body) = send(
        &app,
        empty_request("DELETE", &format!("/api/roles/{admin_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("Cannot delete role as it is assigned to users")
    );

    let users = list(&app, "users").await;
    assert_eq!(users[0]["roles"], json!([{ "_id": admin_id, "name": "admin" }]));
    assert_eq!(users[0]["status"], json!("Active"));
}

#[tokio::test]
async fn duplicate_names_and_emails_are_rejected() {
    let app = memory_app();

    let (status, _) = send(&app, json_request("POST", "/api/roles", json!({ "name": "admin" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) =
        send(&app, json_request("POST", "/api/roles", json!({ "name": "admin" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Role with this name already exists"));

    send(
        &app,
        json_request("POST", "/api/permissions", json!({ "name": "write" })),
    )
    .await;
    let (status, body) = send(
        &app,
        json_request("POST", "/api/permissions", json!({ "name": "write" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("Permission with this name already exists")
    );

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            json!({ "name": "X", "email": "x@y.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            json!({ "name": "X again", "email": "X@Y.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("User with this email already exists"));
    assert_eq!(list(&app, "users").await.len(), 1);
}

#[tokio::test]
async fn user_email_is_stored_lowercase() {
    let app = memory_app();
    send(
        &app,
        json_request(
            "POST",
            "/api/users",
            json!({ "name": "Al", "email": "A@B.com", "status": "Inactive" }),
        ),
    )
    .await;
    let users = list(&app, "users").await;
    assert_eq!(users[0]["email"], json!("a@b.com"));
    assert_eq!(users[0]["status"], json!("Inactive"));
}

#[tokio::test]
async fn role_edit_merges_falsy_fields() {
    let app = memory_app();
    send(
        &app,
        json_request("POST", "/api/permissions", json!({ "name": "read" })),
    )
    .await;
    let read_id = id_of(&app, "permissions", "name", "read").await;
    send(
        &app,
        json_request(
            "POST",
            "/api/roles",
            json!({ "name": "viewer", "permissions": [read_id] }),
        ),
    )
    .await;
    let viewer_id = id_of(&app, "roles", "name", "viewer").await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/roles/{viewer_id}"),
            json!({ "name": "", "permissions": [] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Role updated"));

    let roles = list(&app, "roles").await;
    assert_eq!(roles[0]["name"], json!("viewer"));
    assert_eq!(roles[0]["permissions"].as_array().map(Vec::len), Some(1));

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/roles/{viewer_id}"),
            json!({ "name": "reader" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list(&app, "roles").await[0]["name"], json!("reader"));
}

#[tokio::test]
async fn user_edit_checks_email_and_status() {
    let app = memory_app();
    for (name, email) in [("One", "one@example.com"), ("Two", "two@example.com")] {
        send(
            &app,
            json_request("POST", "/api/users", json!({ "name": name, "email": email })),
        )
        .await;
    }
    let two_id = id_of(&app, "users", "email", "two@example.com").await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/users/{two_id}"),
            json!({ "email": "ONE@example.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Email already in use"));

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/users/{two_id}"),
            json!({ "email": "TWO@example.com", "status": "" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/users/{two_id}"),
            json!({ "status": "Suspended" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/users/{two_id}"),
            json!({ "status": "Inactive" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("User updated"));
    let two = list(&app, "users")
        .await
        .into_iter()
        .find(|user| user["_id"] == json!(two_id))
        .expect("user two");
    assert_eq!(two["status"], json!("Inactive"));
    assert_eq!(two["email"], json!("two@example.com"));
}

#[tokio::test]
async fn missing_records_on_edit_and_delete() {
    let app = memory_app();
    let ghost = uuid::Uuid::new_v4();

    let (status, body) = send(
        &app,
        json_request("PUT", &format!("/api/roles/{ghost}"), json!({ "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Role not found"));

    let (status, _) = send(
        &app,
        json_request("PUT", &format!("/api/users/{ghost}"), json!({ "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for resource in ["permissions", "roles", "users"] {
        let (status, body) = send(
            &app,
            empty_request("DELETE", &format!("/api/{resource}/{ghost}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{resource}");
        assert_eq!(body["success"], json!(true));
    }
}

#[tokio::test]
async fn blank_required_fields_are_rejected() {
    let app = memory_app();
    let (status, body) = send(
        &app,
        json_request("POST", "/api/permissions", json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("name is required"));

    let (status, body) = send(
        &app,
        json_request("POST", "/api/users", json!({ "name": "No Email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("email is required"));
}

#[tokio::test]
async fn malformed_path_id_is_rejected_before_the_directory() {
    let app = memory_app();
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/api/roles/not-a-uuid"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_failure_reports_cause_and_next_request_succeeds() {
    let store = Arc::new(FlakyStore::new());
    let app = common::app_with_store(store.clone());

    store.fail(true);
    let (status, body) = send(
        &app,
        json_request("POST", "/api/roles", json!({ "name": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Error adding role"));
    assert_eq!(body["error"], json!("store offline"));

    let (status, body) = send(&app, empty_request("GET", "/api/system/health")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], json!("storage unavailable"));

    store.fail(false);
    let (status, _) = send(
        &app,
        json_request("POST", "/api/roles", json!({ "name": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(list(&app, "roles").await.len(), 1);
}

#[tokio::test]
async fn system_endpoints_and_openapi() {
    let app = memory_app();

    let (status, body) = send(&app, empty_request("GET", "/api/system/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));

    let (status, body) = send(&app, empty_request("GET", "/api/system/info")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_version"], json!("v1"));
    assert_eq!(body["storage_backend"], json!("memory"));
    assert_eq!(body["durable_storage"], json!(false));

    let (status, body) = send(&app, empty_request("GET", "/api/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().expect("paths");
    for path in [
        "/api/permissions/all",
        "/api/permissions",
        "/api/permissions/{id}",
        "/api/roles/{id}",
        "/api/users/{id}",
    ] {
        assert!(paths.contains_key(path), "{path} missing from openapi");
    }
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = memory_app();
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/roles/all")
        .header("origin", "http://localhost:3000")
        .body(axum::body::Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}
