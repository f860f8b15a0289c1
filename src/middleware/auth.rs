//! Extractors exposing the verified caller to handlers.
//!
//! The gate has already decided whether the request may proceed; these only
//! recover the claims for handlers that need the caller's identity.

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header, request::Parts},
};
use tarkib_auth::{ClaimSet, DecodeError, Role, decode};
use tarkib_core::AppError;
use uuid::Uuid;

use crate::middleware::gate::{EXPIRED_MESSAGE, FORBIDDEN_MESSAGE};
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct AuthUser(pub ClaimSet);

impl AuthUser {
    pub fn is_super_admin(&self) -> bool {
        self.0.role == Role::SuperAdmin
    }

    /// Needed on list routes whose path is also matched by a broader
    /// `:id` rule granted to lower roles.
    pub fn require_super_admin(&self) -> Result<(), AppError> {
        if self.is_super_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden(FORBIDDEN_MESSAGE))
        }
    }

    /// Subject claim as an account id.
    pub fn subject_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.subject)
            .map_err(|_| AppError::unauthorized("Invalid subject in token"))
    }
}

fn raw_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = raw_token(parts)
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        match decode(token, state.signing_key()) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(DecodeError::Expired) => Err(AppError::unauthorized(EXPIRED_MESSAGE)),
            Err(err) => Err(AppError::unauthorized(err.to_string())),
        }
    }
}

/// `Option<AuthUser>` resolves to `None` for anonymous callers and for
/// credentials that do not decode.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(raw_token(parts)
            .and_then(|token| decode(token, state.signing_key()).ok())
            .map(AuthUser))
    }
}
