use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tarkib_core::AppError;
use tarkib_models::categories::{
    AppendSubCategoriesDto, AppendSubCategoryDto, Category, CategoryWithSubCategories,
    CreateCategoryDto, CreateSourceDto, LanguageQuery, Source, SourceListResponse, SubCategory,
    SubCategoryNames, UpdateCategoryDto,
};
use tarkib_models::{Language, MessageResponse};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::categories::service::CategoryService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

pub(crate) fn parse_language(value: Option<&str>) -> Result<Language, AppError> {
    Language::from_query(value).map_err(AppError::bad_request)
}

#[utoipa::path(
    post,
    path = "/v1/category",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category and subcategories created", body = CategoryWithSubCategories),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<CategoryWithSubCategories>), AppError> {
    let category = CategoryService::create_category(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    put,
    path = "/v1/category/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = MessageResponse),
        (status = 404, description = "Category or subcategory not found", body = ErrorResponse)
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCategoryDto>,
) -> Result<Json<MessageResponse>, AppError> {
    CategoryService::update_category(&state.db, id, dto).await?;
    Ok(Json(MessageResponse::new("Category updated")))
}

#[utoipa::path(
    delete,
    path = "/v1/category/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CategoryService::delete_category(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Category deleted")))
}

#[utoipa::path(
    get,
    path = "/v1/category/categories",
    params(LanguageQuery),
    responses(
        (status = 200, description = "Categories with subcategories", body = [CategoryWithSubCategories]),
        (status = 400, description = "Unsupported language", body = ErrorResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_categories_with_subcategories(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<Vec<CategoryWithSubCategories>>, AppError> {
    let language = parse_language(query.language.as_deref())?;
    let categories = CategoryService::get_categories_with_subcategories(&state.db, language).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/v1/categories",
    responses((status = 200, description = "All categories", body = [Category])),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, AppError> {
    let categories = CategoryService::get_categories(&state.db).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/v1/category/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category with subcategories", body = CategoryWithSubCategories),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CategoryWithSubCategories>, AppError> {
    let category = CategoryService::get_category(&state.db, id).await?;
    Ok(Json(category))
}

#[utoipa::path(
    put,
    path = "/v1/subcategory/append",
    request_body = Vec<AppendSubCategoryDto>,
    responses(
        (status = 200, description = "Subcategories created", body = [SubCategory]),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn append_subcategories(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<AppendSubCategoriesDto>,
) -> Result<Json<Vec<SubCategory>>, AppError> {
    let created = CategoryService::append_subcategories(&state.db, dto.items).await?;
    Ok(Json(created))
}

#[utoipa::path(
    put,
    path = "/v1/subcategory/{id}",
    params(("id" = Uuid, Path, description = "Subcategory ID")),
    request_body = SubCategoryNames,
    responses(
        (status = 200, description = "Subcategory updated", body = MessageResponse),
        (status = 404, description = "Subcategory not found", body = ErrorResponse)
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_subcategory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<SubCategoryNames>,
) -> Result<Json<MessageResponse>, AppError> {
    CategoryService::update_subcategory(&state.db, id, dto).await?;
    Ok(Json(MessageResponse::new("Subcategory updated")))
}

#[utoipa::path(
    delete,
    path = "/v1/subcategory/{id}",
    params(("id" = Uuid, Path, description = "Subcategory ID")),
    responses(
        (status = 200, description = "Subcategory deleted", body = MessageResponse),
        (status = 404, description = "Subcategory not found", body = ErrorResponse)
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_subcategory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CategoryService::delete_subcategory(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Subcategory deleted")))
}

#[utoipa::path(
    get,
    path = "/v1/subcategories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses((status = 200, description = "Subcategories of the category", body = [SubCategory])),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_subcategories(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<Vec<SubCategory>>, AppError> {
    let subcategories = CategoryService::get_subcategories(&state.db, category_id).await?;
    Ok(Json(subcategories))
}

#[utoipa::path(
    post,
    path = "/v1/category/source",
    request_body = CreateSourceDto,
    responses(
        (status = 201, description = "Source created", body = Source),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Sources",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_source(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSourceDto>,
) -> Result<(StatusCode, Json<Source>), AppError> {
    let source = CategoryService::create_source(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(source)))
}

#[utoipa::path(
    get,
    path = "/v1/category/source",
    responses((status = 200, description = "All sources", body = SourceListResponse)),
    tag = "Sources"
)]
#[instrument(skip(state))]
pub async fn get_sources(State(state): State<AppState>) -> Result<Json<SourceListResponse>, AppError> {
    let data = CategoryService::get_sources(&state.db).await?;
    Ok(Json(SourceListResponse { data }))
}

#[utoipa::path(
    delete,
    path = "/v1/category/source/delete/{id}",
    params(("id" = Uuid, Path, description = "Source ID")),
    responses(
        (status = 200, description = "Source deleted", body = MessageResponse),
        (status = 404, description = "Source not found", body = ErrorResponse)
    ),
    tag = "Sources",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_source(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CategoryService::delete_source(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Source deleted")))
}
