use std::env;

/// Locations of the role model and the policy rules loaded at startup.
#[derive(Clone, Debug)]
pub struct PolicyConfig {
    pub model_path: String,
    pub policy_path: String,
}

impl PolicyConfig {
    pub fn from_env() -> Self {
        Self {
            model_path: env::var("CASBIN_MODEL_PATH")
                .unwrap_or_else(|_| "config/rbac_model.conf".to_string()),
            policy_path: env::var("CASBIN_POLICY_PATH")
                .unwrap_or_else(|_| "config/policy.csv".to_string()),
        }
    }
}
