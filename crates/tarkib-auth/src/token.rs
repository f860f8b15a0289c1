//! HS256 token codec.
//!
//! Access tokens carry `exp` as an RFC 3339 string (`"2025-03-01T10:00:00Z"`)
//! rather than a numeric timestamp. The signature library is told not to
//! look at `exp`; [`decode`] parses it into a `DateTime<Utc>` and compares it
//! against the clock itself, so every expired token surfaces as
//! [`DecodeError::Expired`].

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, encode};
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::claims::{ClaimSet, Role, claim_to_string};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Bad structure or signature mismatch.
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("expiration claim is missing or invalid")]
    MissingExpiry,
    #[error("token is expired")]
    Expired,
}

#[derive(Debug, Error)]
#[error("failed to sign token: {0}")]
pub struct IssueError(#[from] jsonwebtoken::errors::Error);

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    // `exp` is a string; checked below.
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation
}

/// Verifies `token` with `signing_key` and returns its claims.
///
/// `token` is the raw `Authorization` header value; no `Bearer ` prefix is
/// removed.
pub fn decode(token: &str, signing_key: &[u8]) -> Result<ClaimSet, DecodeError> {
    decode_at(token, signing_key, Utc::now())
}

/// [`decode`] against a fixed clock.
pub fn decode_at(
    token: &str,
    signing_key: &[u8],
    now: DateTime<Utc>,
) -> Result<ClaimSet, DecodeError> {
    let data = jsonwebtoken::decode::<HashMap<String, Value>>(
        token,
        &DecodingKey::from_secret(signing_key),
        &validation(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => DecodeError::Expired,
        _ => DecodeError::Malformed(e.to_string()),
    })?;
    let claims = data.claims;

    let expires_at = claims
        .get("exp")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(DecodeError::MissingExpiry)?;

    if now > expires_at {
        return Err(DecodeError::Expired);
    }

    Ok(ClaimSet {
        subject: claim_to_string(claims.get("sub")),
        role: Role::from_claim(claims.get("role")),
        expires_at,
        issued_at: claims.get("iat").and_then(parse_issued_at),
        audience: parse_audience(claims.get("aud")),
    })
}

fn parse_issued_at(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

fn parse_audience(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Signs an access token for `subject` with `role`.
///
/// `exp` is written as an RFC 3339 string in UTC with second precision and
/// `iat` as a Unix timestamp.
pub fn issue(
    subject: &str,
    role: Role,
    expires_at: DateTime<Utc>,
    audience: &[String],
    signing_key: &[u8],
) -> Result<String, IssueError> {
    let mut claims = Map::new();
    claims.insert("sub".into(), json!(subject));
    claims.insert("role".into(), json!(role.as_str()));
    claims.insert(
        "exp".into(),
        json!(expires_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    claims.insert("iat".into(), json!(Utc::now().timestamp()));
    claims.insert("aud".into(), json!(audience));

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?;
    Ok(token)
}
