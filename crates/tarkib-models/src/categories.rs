//! Category taxonomy and news sources.
//!
//! Categories and subcategories carry both an Uzbek and a Russian name.
//! Language-scoped listings additionally fill `name` with the requested
//! language.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::language::Language;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name_uz: String,
    pub name_ru: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubCategory {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name_uz: String,
    pub name_ru: String,
    /// Set only in language-scoped listings.
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CategoryWithSubCategories {
    pub id: Uuid,
    pub name_uz: String,
    pub name_ru: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub subcategories: Vec<SubCategory>,
}

impl CategoryWithSubCategories {
    pub fn new(category: Category, subcategories: Vec<SubCategory>) -> Self {
        Self {
            id: category.id,
            name_uz: category.name_uz,
            name_ru: category.name_ru,
            name: None,
            subcategories,
        }
    }

    /// Fills `name` on the category and each subcategory.
    pub fn localized(mut self, language: Language) -> Self {
        self.name = Some(language.pick(&self.name_uz, &self.name_ru).to_string());
        for sub in &mut self.subcategories {
            sub.name = Some(language.pick(&sub.name_uz, &sub.name_ru).to_string());
        }
        self
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubCategoryNames {
    #[validate(length(min = 1, message = "name_uz is required"))]
    pub name_uz: String,
    #[validate(length(min = 1, message = "name_ru is required"))]
    pub name_ru: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, message = "name_uz is required"))]
    pub name_uz: String,
    #[validate(length(min = 1, message = "name_ru is required"))]
    pub name_ru: String,
    #[serde(default)]
    #[validate(nested)]
    pub subcategories: Vec<SubCategoryNames>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubCategoryRename {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub name_uz: String,
    #[validate(length(min = 1))]
    pub name_ru: String,
}

/// Renames a category and, optionally, some of its subcategories.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1))]
    pub name_uz: String,
    #[validate(length(min = 1))]
    pub name_ru: String,
    #[serde(default)]
    #[validate(nested)]
    pub subcategories: Vec<SubCategoryRename>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AppendSubCategoryDto {
    pub category_id: Uuid,
    #[validate(length(min = 1, message = "name_uz is required"))]
    pub name_uz: String,
    #[validate(length(min = 1, message = "name_ru is required"))]
    pub name_ru: String,
}

/// Body of `PUT /subcategory/append`: a list of subcategories to add.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(transparent)]
pub struct AppendSubCategoriesDto {
    #[validate(length(min = 1, message = "at least one subcategory is required"), nested)]
    pub items: Vec<AppendSubCategoryDto>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct LanguageQuery {
    /// `uz` (default) or `ru`.
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Source {
    pub id: Uuid,
    pub site_name: String,
    pub site_url: String,
    pub site_image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSourceDto {
    #[validate(length(min = 1, message = "site_name is required"))]
    pub site_name: String,
    #[validate(url(message = "site_url must be a valid URL"))]
    pub site_url: String,
    pub site_image_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SourceListResponse {
    pub data: Vec<Source>,
}
