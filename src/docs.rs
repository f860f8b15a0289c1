use tarkib_auth::Role;
use tarkib_core::{PaginationMeta, PaginationParams};
use tarkib_models::MessageResponse;
use tarkib_models::admins::{
    Admin, AdminListResponse, AdminLoginRequest, AdminLoginResponse, CreateAdminDto,
    EditAdminDto, EditSuperAdminDto, SuperAdmin, SuperAdminLoginRequest, SuperAdminLoginResponse,
};
use tarkib_models::ads::{Ad, AdListResponse, CreateAdDto, UpdateAdDto};
use tarkib_models::categories::{
    AppendSubCategoryDto, Category, CategoryWithSubCategories, CreateCategoryDto,
    CreateSourceDto, Source, SourceListResponse, SubCategory, SubCategoryNames,
    SubCategoryRename, UpdateCategoryDto,
};
use tarkib_models::news::{
    CreateNewsDto, CreatedNewsResponse, Link, News, NewsListResponse, UpdateNewsDto,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::admin_login,
        crate::modules::auth::controller::superadmin_login,
        crate::modules::auth::controller::create_admin,
        crate::modules::auth::controller::delete_admin,
        crate::modules::auth::controller::get_all_admins,
        crate::modules::auth::controller::edit_admin,
        crate::modules::auth::controller::get_admin,
        crate::modules::auth::controller::edit_superadmin,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::update_category,
        crate::modules::categories::controller::delete_category,
        crate::modules::categories::controller::get_categories_with_subcategories,
        crate::modules::categories::controller::get_categories,
        crate::modules::categories::controller::get_category,
        crate::modules::categories::controller::append_subcategories,
        crate::modules::categories::controller::update_subcategory,
        crate::modules::categories::controller::delete_subcategory,
        crate::modules::categories::controller::get_subcategories,
        crate::modules::categories::controller::create_source,
        crate::modules::categories::controller::get_sources,
        crate::modules::categories::controller::delete_source,
        crate::modules::news::controller::create_news,
        crate::modules::news::controller::get_all_news,
        crate::modules::news::controller::get_filtered_news,
        crate::modules::news::controller::search_news,
        crate::modules::news::controller::get_news,
        crate::modules::news::controller::update_news,
        crate::modules::news::controller::delete_news,
        crate::modules::ads::controller::create_ad,
        crate::modules::ads::controller::update_ad,
        crate::modules::ads::controller::delete_ad,
        crate::modules::ads::controller::get_ad,
        crate::modules::ads::controller::get_all_ads,
    ),
    components(
        schemas(
            Role,
            ErrorResponse,
            MessageResponse,
            PaginationMeta,
            PaginationParams,
            Admin,
            SuperAdmin,
            AdminLoginRequest,
            AdminLoginResponse,
            SuperAdminLoginRequest,
            SuperAdminLoginResponse,
            CreateAdminDto,
            EditAdminDto,
            EditSuperAdminDto,
            AdminListResponse,
            Category,
            SubCategory,
            CategoryWithSubCategories,
            CreateCategoryDto,
            SubCategoryNames,
            SubCategoryRename,
            UpdateCategoryDto,
            AppendSubCategoryDto,
            Source,
            CreateSourceDto,
            SourceListResponse,
            Link,
            News,
            CreateNewsDto,
            UpdateNewsDto,
            CreatedNewsResponse,
            NewsListResponse,
            Ad,
            CreateAdDto,
            UpdateAdDto,
            AdListResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Admin and super admin accounts"),
        (name = "Categories", description = "Category and subcategory taxonomy"),
        (name = "Sources", description = "News sources"),
        (name = "News", description = "Bilingual news articles"),
        (name = "Ads", description = "Banner advertisements")
    ),
    info(
        title = "Tarkib API",
        version = "0.1.0",
        description = "Backend for the Tarkib news site. Every /v1 route is checked against the role policy; send the access token as the raw `Authorization` header value.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization"))),
            )
        }
    }
}
