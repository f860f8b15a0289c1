//! Role/path/method policy table backed by casbin.
//!
//! The table is loaded once at startup from a model file and a CSV policy
//! file and shared read-only behind an `Arc`. Rules look like:
//!
//! ```text
//! p, admin, /v1/news/create, POST
//! p, unauthorized, /v1/news/get/:id, GET
//! g, super-admin, admin
//! ```
//!
//! Paths use casbin's `keyMatch2` grammar (`:param` segments and `*`), the
//! method column accepts `*`, and `g` lines make one role inherit another.

use std::fmt;
use std::sync::Arc;

use casbin::{CoreApi, DefaultModel, Enforcer, FileAdapter, MemoryAdapter, MgmtApi};
use thiserror::Error;

use crate::claims::Role;

#[derive(Debug, Error)]
pub enum EnforceError {
    #[error("failed to load policy: {0}")]
    Load(#[source] casbin::Error),
    #[error("invalid policy line {line}: {content}")]
    InvalidRule { line: usize, content: String },
    #[error("policy lookup failed: {0}")]
    Lookup(#[source] casbin::Error),
}

#[derive(Clone)]
pub struct PolicyTable {
    enforcer: Arc<Enforcer>,
}

impl fmt::Debug for PolicyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyTable").finish_non_exhaustive()
    }
}

impl PolicyTable {
    /// Loads the model and policy files.
    pub async fn load(model_path: &str, policy_path: &str) -> Result<Self, EnforceError> {
        let model = DefaultModel::from_file(model_path)
            .await
            .map_err(EnforceError::Load)?;
        let adapter = FileAdapter::new(policy_path.to_owned());
        let enforcer = Enforcer::new(model, adapter)
            .await
            .map_err(EnforceError::Load)?;

        tracing::info!(model_path, policy_path, "policy table loaded");
        Ok(Self {
            enforcer: Arc::new(enforcer),
        })
    }

    /// Builds a table from in-memory model text and CSV policy text.
    pub async fn from_text(model: &str, policy_csv: &str) -> Result<Self, EnforceError> {
        let (policies, groupings) = parse_policy_csv(policy_csv)?;

        let model = DefaultModel::from_str(model)
            .await
            .map_err(EnforceError::Load)?;
        let mut enforcer = Enforcer::new(model, MemoryAdapter::default())
            .await
            .map_err(EnforceError::Load)?;

        if !policies.is_empty() {
            enforcer
                .add_policies(policies)
                .await
                .map_err(EnforceError::Load)?;
        }
        if !groupings.is_empty() {
            enforcer
                .add_grouping_policies(groupings)
                .await
                .map_err(EnforceError::Load)?;
        }

        Ok(Self {
            enforcer: Arc::new(enforcer),
        })
    }

    /// Checks whether `role` may call `method` on `path`.
    ///
    /// `OPTIONS` is always allowed without consulting the table.
    pub fn enforce(&self, role: Role, path: &str, method: &str) -> Result<bool, EnforceError> {
        if method.eq_ignore_ascii_case("OPTIONS") {
            return Ok(true);
        }

        self.enforcer
            .enforce((role.as_str(), path, method))
            .map_err(EnforceError::Lookup)
    }
}

type Rules = Vec<Vec<String>>;

fn parse_policy_csv(text: &str) -> Result<(Rules, Rules), EnforceError> {
    let mut policies = Vec::new();
    let mut groupings = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let kind = fields.next().unwrap_or_default();
        let rest: Vec<String> = fields.map(str::to_string).collect();

        match (kind, rest.len()) {
            ("p", 3) => policies.push(rest),
            ("g", 2) => groupings.push(rest),
            _ => {
                return Err(EnforceError::InvalidRule {
                    line: idx + 1,
                    content: line.to_string(),
                });
            }
        }
    }

    Ok((policies, groupings))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = include_str!("../../../config/rbac_model.conf");

    const RULES: &str = "
        # sample
        p, admin, /v1/news/create, POST
        p, unauthorized, /v1/news/get/:id, GET
        p, super-admin, /v1/auth/admin/create, POST
        p, admin, /v1/category/*, *
        g, super-admin, admin
    ";

    async fn table() -> PolicyTable {
        PolicyTable::from_text(MODEL, RULES).await.unwrap()
    }

    #[tokio::test]
    async fn test_exact_rule_allows() {
        let table = table().await;
        assert!(table.enforce(Role::Admin, "/v1/news/create", "POST").unwrap());
    }

    #[tokio::test]
    async fn test_missing_rule_denies() {
        let table = table().await;
        assert!(!table.enforce(Role::Admin, "/v1/news/create", "GET").unwrap());
        assert!(
            !table
                .enforce(Role::Unauthorized, "/v1/auth/admin/create", "POST")
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_path_parameter_matches_one_segment() {
        let table = table().await;
        assert!(
            table
                .enforce(Role::Unauthorized, "/v1/news/get/123", "GET")
                .unwrap()
        );
        assert!(
            !table
                .enforce(Role::Unauthorized, "/v1/news/get/1/2", "GET")
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_wildcards() {
        let table = table().await;
        assert!(table.enforce(Role::Admin, "/v1/category/9", "DELETE").unwrap());
        assert!(table.enforce(Role::Admin, "/v1/category/source", "POST").unwrap());
    }

    #[tokio::test]
    async fn test_super_admin_inherits_admin() {
        let table = table().await;
        assert!(
            table
                .enforce(Role::SuperAdmin, "/v1/news/create", "POST")
                .unwrap()
        );
        assert!(
            !table
                .enforce(Role::Admin, "/v1/auth/admin/create", "POST")
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_options_always_allowed() {
        let table = table().await;
        for role in [Role::Unauthorized, Role::Unknown, Role::User] {
            assert!(table.enforce(role, "/v1/anything", "OPTIONS").unwrap());
        }
    }

    #[tokio::test]
    async fn test_unknown_role_is_denied() {
        let table = table().await;
        assert!(!table.enforce(Role::Unknown, "/v1/news/get/1", "GET").unwrap());
    }

    #[tokio::test]
    async fn test_enforce_is_idempotent() {
        let table = table().await;
        let first = table.enforce(Role::Admin, "/v1/news/create", "POST").unwrap();
        for _ in 0..10 {
            assert_eq!(
                table.enforce(Role::Admin, "/v1/news/create", "POST").unwrap(),
                first
            );
        }
    }

    #[test]
    fn test_invalid_rule_line_is_reported() {
        let err = parse_policy_csv("p, admin, /v1/x\n").unwrap_err();
        assert!(matches!(err, EnforceError::InvalidRule { line: 1, .. }));
    }
}
