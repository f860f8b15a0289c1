//! Decoded token payload and the closed set of caller roles.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Role of the caller for one request.
///
/// Mapped once from the token's `role` claim; everything downstream matches
/// on the enum. [`Role::Unknown`] is never granted by the shipped policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// No credential was presented.
    Unauthorized,
    User,
    Admin,
    SuperAdmin,
    /// A verified credential carried an unrecognised role claim.
    Unknown,
}

impl Role {
    /// Tag used on the wire and in the policy table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Unauthorized => "unauthorized",
            Role::User => "user",
            Role::Admin => "admin",
            Role::SuperAdmin => "super-admin",
            Role::Unknown => "unknown",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "unauthorized" => Role::Unauthorized,
            "user" => Role::User,
            "admin" => Role::Admin,
            "super-admin" => Role::SuperAdmin,
            _ => Role::Unknown,
        }
    }

    /// Maps a raw `role` claim. Non-string scalars are rendered to text
    /// first, so `1` becomes `"1"` and maps to `Unknown`.
    pub fn from_claim(value: Option<&Value>) -> Self {
        Self::from_tag(&claim_to_string(value))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders a claim value as text: strings as-is, numbers and booleans
/// formatted, null or missing as empty.
pub(crate) fn claim_to_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Verified contents of an access token.
///
/// Only [`crate::token::decode`] builds one, after the signature and expiry
/// have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSet {
    pub subject: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
    pub issued_at: Option<DateTime<Utc>>,
    pub audience: Vec<String>,
}
