use crate::claims::Role;
use crate::token::{self, DecodeError};

/// Resolves the caller's role from the `Authorization` header.
///
/// A missing or empty header is an anonymous caller and resolves to
/// [`Role::Unauthorized`]. Decode failures are returned unchanged.
pub fn resolve_role(header: Option<&str>, signing_key: &[u8]) -> Result<Role, DecodeError> {
    match header {
        None | Some("") => Ok(Role::Unauthorized),
        Some(raw) => token::decode(raw, signing_key).map(|claims| claims.role),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    const KEY: &[u8] = b"resolver-key";

    #[test]
    fn test_absent_or_empty_header_is_unauthorized() {
        assert_eq!(resolve_role(None, KEY), Ok(Role::Unauthorized));
        assert_eq!(resolve_role(Some(""), KEY), Ok(Role::Unauthorized));
    }

    #[test]
    fn test_role_claim_is_resolved() {
        let expires_at = Utc::now() + Duration::hours(1);
        for role in [Role::Unauthorized, Role::User, Role::Admin, Role::SuperAdmin] {
            let token = token::issue("7", role, expires_at, &[], KEY).unwrap();
            assert_eq!(resolve_role(Some(&token), KEY), Ok(role));
        }
    }

    #[test]
    fn test_decode_errors_propagate() {
        let expired = token::issue("7", Role::Admin, Utc::now() - Duration::minutes(1), &[], KEY)
            .unwrap();
        assert_eq!(resolve_role(Some(&expired), KEY), Err(DecodeError::Expired));
        assert!(matches!(
            resolve_role(Some("junk"), KEY),
            Err(DecodeError::Malformed(_))
        ));
    }
}
