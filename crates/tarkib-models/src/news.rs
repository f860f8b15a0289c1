//! News articles.
//!
//! An article is published as a pair of rows, one per [`Language`], that
//! share a `special_id`. Each row keeps its own subcategory associations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use tarkib_core::pagination::deserialize_optional_i64;
use tarkib_core::{PaginationMeta, PaginationParams};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::language::Language;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct Link {
    #[validate(length(min = 1))]
    pub link_name: String,
    #[validate(url)]
    pub link_url: String,
}

/// Row as stored in `news`.
#[derive(Debug, Clone, FromRow)]
pub struct NewsRow {
    pub id: Uuid,
    pub special_id: Uuid,
    pub language: String,
    pub name: String,
    pub description: String,
    pub text: String,
    pub image_url: Option<String>,
    pub voice_url: Option<String>,
    pub video_url: Option<String>,
    pub site_image_link: Option<String>,
    pub links: Json<Vec<Link>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct News {
    pub id: Uuid,
    pub special_id: Uuid,
    pub language: String,
    pub name: String,
    pub description: String,
    pub text: String,
    pub image_url: Option<String>,
    pub voice_url: Option<String>,
    pub video_url: Option<String>,
    pub site_image_link: Option<String>,
    pub links: Vec<Link>,
    pub sub_category_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl News {
    pub fn from_row(row: NewsRow, sub_category_ids: Vec<Uuid>) -> Self {
        Self {
            id: row.id,
            special_id: row.special_id,
            language: row.language,
            name: row.name,
            description: row.description,
            text: row.text,
            image_url: row.image_url,
            voice_url: row.voice_url,
            video_url: row.video_url,
            site_image_link: row.site_image_link,
            links: row.links.0,
            sub_category_ids,
            created_at: row.created_at,
        }
    }
}

/// Creates the Uzbek and Russian rows of one article. Media, links and
/// subcategories are shared by both.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateNewsDto {
    #[validate(length(min = 1, message = "uz_name is required"))]
    pub uz_name: String,
    #[validate(length(min = 1, message = "ru_name is required"))]
    pub ru_name: String,
    #[serde(default)]
    pub uz_description: String,
    #[serde(default)]
    pub ru_description: String,
    #[serde(default)]
    pub uz_text: String,
    #[serde(default)]
    pub ru_text: String,
    pub image_url: Option<String>,
    pub voice_url: Option<String>,
    pub video_url: Option<String>,
    pub site_image_link: Option<String>,
    #[serde(default)]
    pub sub_category_ids: Vec<Uuid>,
    #[serde(default)]
    #[validate(nested)]
    pub links: Vec<Link>,
}

/// One language row in a create operation.
#[derive(Debug, Clone)]
pub struct NewsContent {
    pub language: Language,
    pub name: String,
    pub description: String,
    pub text: String,
}

impl CreateNewsDto {
    pub fn contents(&self) -> [NewsContent; 2] {
        [
            NewsContent {
                language: Language::Uz,
                name: self.uz_name.clone(),
                description: self.uz_description.clone(),
                text: self.uz_text.clone(),
            },
            NewsContent {
                language: Language::Ru,
                name: self.ru_name.clone(),
                description: self.ru_description.clone(),
                text: self.ru_text.clone(),
            },
        ]
    }
}

/// Replaces the content of a single language row.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateNewsDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub text: String,
    pub image_url: Option<String>,
    pub voice_url: Option<String>,
    pub video_url: Option<String>,
    pub site_image_link: Option<String>,
    #[serde(default)]
    pub sub_category_ids: Vec<Uuid>,
    #[serde(default)]
    #[validate(nested)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct NewsListQuery {
    pub language: Option<String>,
    #[serde(flatten)]
    #[param(ignore)]
    pub pagination: PaginationParams,
}

/// Page and limit are inlined because repeated keys do not survive
/// `#[serde(flatten)]`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct FilteredNewsQuery {
    pub language: Option<String>,
    pub category_id: Option<Uuid>,
    /// Subcategory ids, repeated (`?sub_category_ids=a&sub_category_ids=b`)
    /// or comma separated.
    #[serde(default)]
    pub sub_category_ids: Vec<String>,
    pub search: Option<String>,
    /// Page number, from 1.
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Page size, at most 100.
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl FilteredNewsQuery {
    /// Parses every `sub_category_ids` value; blank entries are skipped.
    pub fn sub_category_ids(&self) -> Result<Vec<Uuid>, uuid::Error> {
        self.sub_category_ids
            .iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Uuid::parse_str)
            .collect()
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NewsListResponse {
    pub news: Vec<News>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedNewsResponse {
    pub special_id: Uuid,
    pub ids: Vec<Uuid>,
}
