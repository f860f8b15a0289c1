use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A banner advertisement. `view_count` is only reported to super-admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Ad {
    pub id: Uuid,
    pub link: String,
    pub image_url: String,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Ad {
    /// Copy for public readers, with the counter hidden.
    pub fn public(mut self) -> Self {
        self.view_count = 0;
        self
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAdDto {
    #[validate(url(message = "link must be a valid URL"))]
    pub link: String,
    #[validate(length(min = 1, message = "image_url is required"))]
    pub image_url: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAdDto {
    pub id: Uuid,
    #[validate(url(message = "link must be a valid URL"))]
    pub link: String,
    #[validate(length(min = 1, message = "image_url is required"))]
    pub image_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdListResponse {
    pub ads: Vec<Ad>,
}
