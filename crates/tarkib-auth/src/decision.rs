//! Per-request authorization outcome.

use crate::claims::Role;
use crate::policy::PolicyTable;
use crate::resolver::resolve_role;
use crate::token::DecodeError;

/// Outcome of one authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Credential expired; the caller should log in again (401).
    DenyExpired,
    /// No grant for this role or an unusable credential (403).
    DenyForbidden,
    /// The policy lookup failed (403).
    DenyError,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::DenyExpired => "deny_expired",
            Decision::DenyForbidden => "deny_forbidden",
            Decision::DenyError => "deny_error",
        }
    }
}

/// Resolves the caller and checks `(role, path, method)` against `policy`.
///
/// Expired credentials map to [`Decision::DenyExpired`]; every other decode
/// failure, a missing grant and a failed lookup all deny.
pub fn authorize(
    header: Option<&str>,
    path: &str,
    method: &str,
    signing_key: &[u8],
    policy: &PolicyTable,
) -> Decision {
    let role = match resolve_role(header, signing_key) {
        Ok(role) => role,
        Err(DecodeError::Expired) => return Decision::DenyExpired,
        Err(err) => {
            tracing::debug!(error = %err, path, method, "credential rejected");
            return Decision::DenyForbidden;
        }
    };

    decide(role, path, method, policy)
}

fn decide(role: Role, path: &str, method: &str, policy: &PolicyTable) -> Decision {
    match policy.enforce(role, path, method) {
        Ok(true) => Decision::Allow,
        Ok(false) => Decision::DenyForbidden,
        Err(err) => {
            tracing::error!(error = %err, %role, path, method, "policy enforcement failed");
            Decision::DenyError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::issue;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    const MODEL: &str = include_str!("../../../config/rbac_model.conf");
    const KEY: &[u8] = b"gate-key";

    async fn table() -> PolicyTable {
        PolicyTable::from_text(
            MODEL,
            "p, admin, /v1/news/create, POST\n\
             p, unauthorized, /v1/categories, GET\n",
        )
        .await
        .unwrap()
    }

    fn token_for(role: Role) -> String {
        issue("1", role, Utc::now() + Duration::hours(1), &[], KEY).unwrap()
    }

    #[tokio::test]
    async fn test_admin_may_create_news() {
        let policy = table().await;
        let token = token_for(Role::Admin);
        assert_eq!(
            authorize(Some(&token), "/v1/news/create", "POST", KEY, &policy),
            Decision::Allow
        );
    }

    #[tokio::test]
    async fn test_anonymous_is_judged_by_unauthorized_rules() {
        let policy = table().await;
        assert_eq!(
            authorize(None, "/v1/categories", "GET", KEY, &policy),
            Decision::Allow
        );
        assert_eq!(
            authorize(None, "/v1/auth/admin/create", "POST", KEY, &policy),
            Decision::DenyForbidden
        );
    }

    #[tokio::test]
    async fn test_expired_credential_requires_refresh() {
        let policy = table().await;
        let token = encode(
            &Header::default(),
            &json!({"sub": "1", "role": "admin", "exp": "2020-01-01T00:00:00Z"}),
            &EncodingKey::from_secret(KEY),
        )
        .unwrap();
        assert_eq!(
            authorize(Some(&token), "/v1/news/create", "POST", KEY, &policy),
            Decision::DenyExpired
        );
    }

    #[tokio::test]
    async fn test_unparseable_expiry_is_forbidden() {
        let policy = table().await;
        let token = encode(
            &Header::default(),
            &json!({"sub": "1", "role": "admin", "exp": "01/01/2099"}),
            &EncodingKey::from_secret(KEY),
        )
        .unwrap();
        assert_eq!(
            authorize(Some(&token), "/v1/news/create", "POST", KEY, &policy),
            Decision::DenyForbidden
        );
    }

    #[tokio::test]
    async fn test_bad_signature_is_forbidden() {
        let policy = table().await;
        let token = issue("1", Role::Admin, Utc::now() + Duration::hours(1), &[], b"other")
            .unwrap();
        assert_eq!(
            authorize(Some(&token), "/v1/news/create", "POST", KEY, &policy),
            Decision::DenyForbidden
        );
    }

    #[tokio::test]
    async fn test_preflight_is_allowed_for_anyone() {
        let policy = table().await;
        let token = token_for(Role::Unknown);
        assert_eq!(
            authorize(Some(&token), "/v1/auth/admin/create", "OPTIONS", KEY, &policy),
            Decision::Allow
        );
    }

    #[tokio::test]
    async fn test_matcher_failure_denies() {
        // keyMatch2 takes two arguments; the call below fails when evaluated.
        let broken = MODEL.replace(
            "m = g(r.sub, p.sub) && keyMatch2(r.obj, p.obj)",
            "m = keyMatch2(r.obj) && g(r.sub, p.sub)",
        );
        assert_ne!(broken, MODEL);
        let policy = PolicyTable::from_text(&broken, "p, admin, /v1/news/create, POST\n")
            .await
            .unwrap();
        let token = token_for(Role::Admin);

        let decision = authorize(Some(&token), "/v1/news/create", "POST", KEY, &policy);
        assert_eq!(decision, Decision::DenyError);
        assert!(!decision.is_allowed());
    }

    #[test]
    fn test_labels() {
        assert!(Decision::Allow.is_allowed());
        assert!(!Decision::DenyError.is_allowed());
        assert_eq!(Decision::DenyExpired.as_str(), "deny_expired");
    }
}
