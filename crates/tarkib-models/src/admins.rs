//! Admin and super-admin accounts.
//!
//! Password hashes never leave the service layer: the row types here that
//! are serialized to clients have no password field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A content administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The account that manages admins and advertisements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SuperAdmin {
    pub id: Uuid,
    pub phone_number: String,
    pub avatar: Option<String>,
    pub is_blocked: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "editor")]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SuperAdminLoginRequest {
    #[validate(length(min = 1, message = "phone_number is required"))]
    #[schema(example = "+998901234567")]
    pub phone_number: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminLoginResponse {
    pub access_token: String,
    pub admin: Admin,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuperAdminLoginResponse {
    pub access_token: String,
    pub superadmin: SuperAdmin,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAdminDto {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    pub avatar: Option<String>,
}

/// Replaces an admin's username and avatar. The password is only changed
/// when one is supplied.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EditAdminDto {
    pub id: Uuid,
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EditSuperAdminDto {
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminListResponse {
    pub admins: Vec<Admin>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_serialization_has_no_password() {
        let admin = Admin {
            id: Uuid::new_v4(),
            username: "editor".into(),
            avatar: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&admin).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "editor");
    }

    #[test]
    fn test_create_admin_validation() {
        let dto = CreateAdminDto {
            username: "ed".into(),
            password: "123".into(),
            avatar: None,
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_edit_admin_without_password_is_valid() {
        let dto = EditAdminDto {
            id: Uuid::new_v4(),
            username: "editor".into(),
            password: None,
            avatar: Some("a.png".into()),
        };
        assert!(dto.validate().is_ok());
    }
}
