mod common;

use axum::http::StatusCode;
use common::{body_json, empty_request, fresh_token, json_request, test_state};
use serde_json::{Value, json};
use sqlx::PgPool;
use tarkib::router::init_router;
use tarkib_auth::Role;
use tower::ServiceExt;
use uuid::Uuid;

fn admin_token() -> String {
    fresh_token(Role::Admin, &Uuid::new_v4().to_string())
}

fn superadmin_token() -> String {
    fresh_token(Role::SuperAdmin, &Uuid::new_v4().to_string())
}

async fn create_category(app: &axum::Router, token: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/category",
            Some(token),
            json!({
                "name_uz": "Sport",
                "name_ru": "Спорт",
                "subcategories": [
                    {"name_uz": "Futbol", "name_ru": "Футбол"},
                    {"name_uz": "Tennis", "name_ru": "Теннис"}
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_category_listing_is_localized(pool: PgPool) {
    let app = init_router(test_state(pool).await);
    let token = admin_token();
    create_category(&app, &token).await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/v1/category/categories?language=ru", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["name"], "Спорт");
    assert_eq!(body[0]["subcategories"].as_array().unwrap().len(), 2);

    let response = app
        .oneshot(empty_request("GET", "/v1/category/categories?language=en", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_category_removes_subcategories(pool: PgPool) {
    let app = init_router(test_state(pool).await);
    let token = admin_token();
    let category = create_category(&app, &token).await;
    let id = category["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/v1/category/{id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(empty_request("GET", &format!("/v1/subcategories/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_news_is_published_in_both_languages(pool: PgPool) {
    let app = init_router(test_state(pool).await);
    let token = admin_token();
    let category = create_category(&app, &token).await;
    let football = category["subcategories"][0]["id"].as_str().unwrap().to_string();
    let tennis = category["subcategories"][1]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/news/create",
            Some(&token),
            json!({
                "uz_name": "Gol",
                "ru_name": "Гол",
                "uz_description": "Final",
                "ru_description": "Финал",
                "sub_category_ids": [football],
                "links": [{"link_name": "source", "link_url": "https://example.com/goal"}]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["ids"].as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/v1/news/getall?language=ru&page=1&limit=10", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let news = body["news"].as_array().unwrap();
    assert_eq!(news.len(), 1);
    assert_eq!(news[0]["name"], "Гол");
    assert_eq!(news[0]["special_id"], created["special_id"]);
    assert_eq!(news[0]["links"][0]["link_name"], "source");
    assert_eq!(body["meta"]["has_more"], false);

    let response = app
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/v1/news/filtered?sub_category_ids={tennis}"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["news"].as_array().unwrap().is_empty());

    let response = app
        .oneshot(empty_request("GET", "/v1/news/filtered?search=GOL", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["news"].as_array().unwrap().len(), 1);
    assert_eq!(body["news"][0]["language"], "uz");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_accepts_repeated_ids_and_literal_wildcards(pool: PgPool) {
    let app = init_router(test_state(pool).await);
    let token = admin_token();
    let category = create_category(&app, &token).await;
    let football = category["subcategories"][0]["id"].as_str().unwrap().to_string();
    let tennis = category["subcategories"][1]["id"].as_str().unwrap().to_string();

    for (name, sub) in [("Gol", &football), ("Ace", &tennis)] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/v1/news/create",
                Some(&token),
                json!({"uz_name": name, "ru_name": name, "sub_category_ids": [sub]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/v1/news/search?sub_category_ids={football}&sub_category_ids={tennis}"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["news"].as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/v1/news/filtered?sub_category_ids={football},{tennis}"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["news"].as_array().unwrap().len(), 2);

    for term in ["%25", "_", "%5C"] {
        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/v1/news/search?search={term}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await["news"].as_array().unwrap().is_empty());
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_news_with_unknown_subcategory_is_rejected(pool: PgPool) {
    let app = init_router(test_state(pool).await);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/news/create",
            Some(&admin_token()),
            json!({
                "uz_name": "Gol",
                "ru_name": "Гол",
                "sub_category_ids": [Uuid::new_v4()]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(empty_request("GET", "/v1/news/getall", None))
        .await
        .unwrap();
    assert!(body_json(response).await["news"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_ad_views_are_counted_but_hidden(pool: PgPool) {
    let app = init_router(test_state(pool).await);
    let token = superadmin_token();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/ads/",
            Some(&token),
            json!({"link": "https://example.com/promo", "image_url": "promo.png"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/v1/ads/{id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["view_count"], 0);
    }

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/v1/ads/{id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["view_count"], 2);

    let response = app
        .oneshot(empty_request("GET", "/v1/ads/all", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ads"][0]["view_count"], 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_ad_link_conflicts(pool: PgPool) {
    let app = init_router(test_state(pool).await);
    let token = superadmin_token();
    let body = json!({"link": "https://example.com/promo", "image_url": "promo.png"});

    let response = app
        .clone()
        .oneshot(json_request("POST", "/v1/ads/", Some(&token), body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request("POST", "/v1/ads/", Some(&token), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
