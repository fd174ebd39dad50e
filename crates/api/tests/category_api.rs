//! HTTP-level integration tests for the ownership-scoped category CRUD.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json, post_json_auth, put_json_auth};
use sqlx::PgPool;

/// Register + login a user, returning their access token.
async fn setup_user(app: axum::Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": "pw123456" });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "email": email, "password": "pw123456", "platform": "WEB" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Category CRUD round trip.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_category_crud(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = setup_user(app.clone(), "a@x.com").await;

    let body = serde_json::json!({ "name": "Errands", "color": "#f59e0b" });
    let response = post_json_auth(app.clone(), "/api/v1/categories", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Errands");
    assert_eq!(created["is_default"], false);

    let body = serde_json::json!({ "name": "Chores" });
    let response =
        put_json_auth(app.clone(), &format!("/api/v1/categories/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Chores");
    assert_eq!(json["data"]["color"], "#f59e0b");

    let response = delete_auth(app.clone(), &format!("/api/v1/categories/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/v1/categories/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Duplicate category names per user map to 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_category_duplicate_name_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = setup_user(app.clone(), "a@x.com").await;

    let body = serde_json::json!({ "name": "Errands" });
    let response = post_json_auth(app.clone(), "/api/v1/categories", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/categories", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// The same category name is fine across different users.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_category_name_unique_per_user_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = setup_user(app.clone(), "alice@x.com").await;
    let bob = setup_user(app.clone(), "bob@x.com").await;

    let body = serde_json::json!({ "name": "Errands" });
    let response = post_json_auth(app.clone(), "/api/v1/categories", body.clone(), &alice).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/categories", body, &bob).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// A category owned by another user reads as 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_categories_are_ownership_scoped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = setup_user(app.clone(), "alice@x.com").await;
    let bob = setup_user(app.clone(), "bob@x.com").await;

    let body = serde_json::json!({ "name": "Private" });
    let response = post_json_auth(app.clone(), "/api/v1/categories", body, &alice).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), &format!("/api/v1/categories/{id}"), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = serde_json::json!({ "name": "Hijacked" });
    let response = put_json_auth(app, &format!("/api/v1/categories/{id}"), body, &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deleting a category leaves its tasks in place with no category.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_category_delete_unfiles_tasks(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = setup_user(app.clone(), "a@x.com").await;

    let body = serde_json::json!({ "name": "Doomed" });
    let response = post_json_auth(app.clone(), "/api/v1/categories", body, &token).await;
    let category_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let body = serde_json::json!({ "title": "Survivor", "category_id": category_id });
    let response = post_json_auth(app.clone(), "/api/v1/tasks", body, &token).await;
    let task_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response =
        delete_auth(app.clone(), &format!("/api/v1/categories/{category_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/v1/tasks/{task_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["category_id"].is_null());
}
