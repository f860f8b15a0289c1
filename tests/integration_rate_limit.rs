mod common;

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::StatusCode;
use common::{empty_request, json_request, test_state_with};
use serde_json::json;
use sqlx::PgPool;
use tarkib::router::init_router;
use tarkib_config::{LockoutConfig, RateLimitConfig};
use tower::ServiceExt;

fn strict_rate_limits() -> RateLimitConfig {
    RateLimitConfig {
        enabled: true,
        general_per_second: 60,
        general_burst_size: 2,
        auth_per_second: 60,
        auth_burst_size: 1,
    }
}

fn from_peer(
    mut request: axum::http::Request<axum::body::Body>,
    ip: [u8; 4],
) -> axum::http::Request<axum::body::Body> {
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from((ip, 40000))));
    request
}

fn login(ip: [u8; 4]) -> axum::http::Request<axum::body::Body> {
    from_peer(
        json_request(
            "POST",
            "/v1/auth/admin/login",
            None,
            json!({"username": "nobody", "password": "secret123"}),
        ),
        ip,
    )
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_burst_is_limited_per_peer(pool: PgPool) {
    let state = test_state_with(pool, LockoutConfig::default(), strict_rate_limits()).await;
    let app = init_router(state);

    let response = app.clone().oneshot(login([10, 0, 0, 1])).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.clone().oneshot(login([10, 0, 0, 1])).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = app.oneshot(login([10, 0, 0, 2])).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health_is_not_rate_limited(pool: PgPool) {
    let state = test_state_with(pool, LockoutConfig::default(), strict_rate_limits()).await;
    let app = init_router(state);

    for _ in 0..5 {
        let response = app
            .clone()
            .oneshot(from_peer(empty_request("GET", "/healthz", None), [10, 0, 0, 3]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
