use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::gate::authorize_request;
use crate::modules::ads::router::init_ads_router;
use crate::modules::auth::router::{init_auth_router, init_login_router};
use crate::modules::categories::router::init_categories_router;
use crate::modules::news::router::init_news_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

async fn healthz() -> &'static str {
    "ok"
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins = if state.cors_config.allows_any() {
        AllowOrigin::any()
    } else {
        let allowed: Vec<HeaderValue> = state
            .cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}

/// Routes under `/v1`, before the gate is applied.
fn v1_router(state: &AppState) -> Router<AppState> {
    let rate_limits = &state.rate_limit_config;

    let mut login = init_login_router();
    if rate_limits.enabled
        && let Some(config) = rate_limits.auth_governor_config()
    {
        login = login.layer(GovernorLayer::new(Arc::new(config)));
    }

    let mut v1 = Router::new()
        .nest("/auth", init_auth_router().merge(login))
        .nest("/news", init_news_router())
        .merge(init_categories_router())
        .merge(init_ads_router());

    if rate_limits.enabled
        && let Some(config) = rate_limits.general_governor_config()
    {
        v1 = v1.layer(GovernorLayer::new(Arc::new(config)));
    }

    v1
}

/// Builds the application. Every `/v1` route passes through the
/// authorization gate; health, docs and metrics do not.
pub fn init_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/v1", v1_router(&state))
        .layer(middleware::from_fn_with_state(state.clone(), authorize_request));

    Router::new()
        .route("/healthz", get(healthz))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(api)
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
