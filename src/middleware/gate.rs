//! Authorization gate applied to every `/v1` route.
//!
//! Each request is judged by [`tarkib_auth::authorize`] on its raw
//! `Authorization` header, full request path and method. Allowed requests
//! are forwarded untouched; denials short-circuit with a JSON error.

use axum::{
    extract::{OriginalUri, Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tarkib_auth::{Decision, authorize};
use tarkib_core::AppError;
use tracing::{debug, warn};

use crate::metrics::track_gate_decision;
use crate::state::AppState;

pub const EXPIRED_MESSAGE: &str = "token is expired";
pub const FORBIDDEN_MESSAGE: &str = "Sizga bu sahifaga kirishga ruxsat yo'q";

pub async fn authorize_request(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let method = req.method().as_str().to_owned();
    // A header that is present but not visible ASCII never falls back to anonymous.
    let decision = match req.headers().get(header::AUTHORIZATION).map(|value| value.to_str()) {
        Some(Err(_)) => Decision::DenyForbidden,
        Some(Ok(raw)) => authorize(Some(raw), &path, &method, state.signing_key(), &state.policy),
        None => authorize(None, &path, &method, state.signing_key(), &state.policy),
    };
    track_gate_decision(decision.as_str());

    match decision {
        Decision::Allow => {
            debug!(path = %path, method = %method, "request authorized");
            next.run(req).await
        }
        Decision::DenyExpired => {
            warn!(path = %path, method = %method, decision = decision.as_str(), "request denied");
            AppError::unauthorized(EXPIRED_MESSAGE).into_response()
        }
        Decision::DenyForbidden | Decision::DenyError => {
            warn!(path = %path, method = %method, decision = decision.as_str(), "request denied");
            AppError::forbidden(FORBIDDEN_MESSAGE).into_response()
        }
    }
}
