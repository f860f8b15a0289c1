mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{
    body_json, disabled_rate_limits, empty_request, fresh_token, insert_admin, insert_superadmin,
    json_request, test_state, test_state_with, SIGNING_KEY,
};
use serde_json::json;
use sqlx::PgPool;
use tarkib::modules::auth::service::{
    ADMIN_BAD_CREDENTIALS, ADMIN_NOT_FOUND, SUPERADMIN_BAD_CREDENTIALS, SUPERADMIN_BLOCKED,
};
use tarkib::router::init_router;
use tarkib_auth::{Role, decode};
use tarkib_config::LockoutConfig;
use tower::ServiceExt;
use uuid::Uuid;

const PHONE: &str = "+998901234567";
const PASSWORD: &str = "correct-horse";

fn superadmin_login(password: &str) -> axum::http::Request<axum::body::Body> {
    json_request(
        "POST",
        "/v1/auth/superadmin/login",
        None,
        json!({"phone_number": PHONE, "password": password}),
    )
}

async fn lockout_app(pool: PgPool) -> axum::Router {
    let lockout = LockoutConfig {
        max_failed_attempts: 3,
        attempt_window: Duration::from_secs(60),
        lockout: Duration::from_secs(300),
    };
    init_router(test_state_with(pool, lockout, disabled_rate_limits()).await)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_login_issues_admin_token(pool: PgPool) {
    let id = insert_admin(&pool, "editor", PASSWORD).await;
    let app = init_router(test_state(pool).await);

    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/auth/admin/login",
            None,
            json!({"username": "editor", "password": PASSWORD}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["admin"]["username"], "editor");
    assert!(body["admin"].get("password").is_none());

    let claims = decode(body["access_token"].as_str().unwrap(), SIGNING_KEY.as_bytes()).unwrap();
    assert_eq!(claims.role, Role::Admin);
    assert_eq!(claims.subject, id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_login_failures(pool: PgPool) {
    insert_admin(&pool, "editor", PASSWORD).await;
    let app = init_router(test_state(pool).await);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/admin/login",
            None,
            json!({"username": "nobody", "password": PASSWORD}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], ADMIN_NOT_FOUND);

    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/auth/admin/login",
            None,
            json!({"username": "editor", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], ADMIN_BAD_CREDENTIALS);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_superadmin_is_locked_after_repeated_failures(pool: PgPool) {
    insert_superadmin(&pool, PHONE, PASSWORD).await;
    let app = lockout_app(pool).await;

    for _ in 0..3 {
        let response = app.clone().oneshot(superadmin_login("wrong")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], SUPERADMIN_BAD_CREDENTIALS);
    }

    let response = app.oneshot(superadmin_login(PASSWORD)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], SUPERADMIN_BLOCKED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lockout_is_per_phone_number(pool: PgPool) {
    insert_superadmin(&pool, PHONE, PASSWORD).await;
    let app = lockout_app(pool).await;

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/v1/auth/superadmin/login",
                None,
                json!({"phone_number": "+998900000000", "password": "wrong"}),
            ))
            .await
            .unwrap();
        // Unknown phone numbers are rejected before any failure is counted.
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app.oneshot(superadmin_login(PASSWORD)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_successful_login_resets_failures(pool: PgPool) {
    insert_superadmin(&pool, PHONE, PASSWORD).await;
    let app = lockout_app(pool).await;

    for _ in 0..2 {
        let response = app.clone().oneshot(superadmin_login("wrong")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = app.clone().oneshot(superadmin_login(PASSWORD)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["superadmin"]["phone_number"], PHONE);

    for _ in 0..2 {
        let response = app.clone().oneshot(superadmin_login("wrong")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = app.oneshot(superadmin_login(PASSWORD)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_blocked_flag_refuses_login(pool: PgPool) {
    insert_superadmin(&pool, PHONE, PASSWORD).await;
    sqlx::query("UPDATE superadmins SET is_blocked = TRUE WHERE phone_number = $1")
        .bind(PHONE)
        .execute(&pool)
        .await
        .unwrap();
    let app = init_router(test_state(pool).await);

    let response = app.oneshot(superadmin_login(PASSWORD)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], SUPERADMIN_BLOCKED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_superadmin_manages_admins(pool: PgPool) {
    let superadmin_id = insert_superadmin(&pool, PHONE, PASSWORD).await;
    let token = fresh_token(Role::SuperAdmin, &superadmin_id.to_string());
    let app = init_router(test_state(pool).await);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/admin/create",
            Some(&token),
            json!({"username": "editor", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/admin/create",
            Some(&token),
            json!({"username": "editor", "password": "secret456"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/v1/auth/admin/getall", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let admins = body["admins"].as_array().unwrap();
    assert_eq!(admins.len(), 1);
    let admin_id = admins[0]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/admin/login",
            None,
            json!({"username": "editor", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/v1/auth/admin/delete/{admin_id}"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(empty_request(
            "DELETE",
            &format!("/v1/auth/admin/delete/{admin_id}"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_reads_admin_profile(pool: PgPool) {
    let id = insert_admin(&pool, "editor", PASSWORD).await;
    let token = fresh_token(Role::Admin, &id.to_string());
    let app = init_router(test_state(pool).await);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/v1/auth/admin/{id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["username"], "editor");

    let response = app
        .oneshot(empty_request(
            "GET",
            &format!("/v1/auth/admin/{}", Uuid::new_v4()),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_superadmin_edits_self_from_token(pool: PgPool) {
    let id = insert_superadmin(&pool, PHONE, PASSWORD).await;
    let token = fresh_token(Role::SuperAdmin, &id.to_string());
    let app = init_router(test_state(pool).await);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/v1/auth/superadmin/edit",
            Some(&token),
            json!({"phone_number": "+998909999999", "password": "new-password"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/auth/superadmin/login",
            None,
            json!({"phone_number": "+998909999999", "password": "new-password"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
