use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::Query as ExtraQuery;
use tarkib_core::AppError;
use tarkib_models::MessageResponse;
use tarkib_models::news::{
    CreateNewsDto, CreatedNewsResponse, FilteredNewsQuery, News, NewsListQuery, NewsListResponse,
    UpdateNewsDto,
};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::categories::controller::parse_language;
use crate::modules::news::service::{NewsFilter, NewsService};
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/v1/news/create",
    request_body = CreateNewsDto,
    responses(
        (status = 201, description = "Yangilik muvaffaqiyatli yaratildi.", body = CreatedNewsResponse),
        (status = 400, description = "Unknown subcategory", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "News",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_news(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateNewsDto>,
) -> Result<(StatusCode, Json<CreatedNewsResponse>), AppError> {
    let created = NewsService::create_news(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/v1/news/getall",
    params(
        NewsListQuery,
        ("page" = Option<i64>, Query, description = "Page number, from 1"),
        ("limit" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "News in the requested language, newest first", body = NewsListResponse),
        (status = 400, description = "Unsupported language", body = ErrorResponse)
    ),
    tag = "News"
)]
#[instrument(skip(state))]
pub async fn get_all_news(
    State(state): State<AppState>,
    Query(query): Query<NewsListQuery>,
) -> Result<Json<NewsListResponse>, AppError> {
    let language = parse_language(query.language.as_deref())?;
    let news = NewsService::get_all_news(&state.db, language, &query.pagination).await?;
    Ok(Json(news))
}

#[utoipa::path(
    get,
    path = "/v1/news/filtered",
    params(FilteredNewsQuery),
    responses(
        (status = 200, description = "Matching news, newest first", body = NewsListResponse),
        (status = 400, description = "Unsupported language or malformed subcategory id", body = ErrorResponse)
    ),
    tag = "News"
)]
#[instrument(skip(state))]
pub async fn get_filtered_news(
    State(state): State<AppState>,
    ExtraQuery(query): ExtraQuery<FilteredNewsQuery>,
) -> Result<Json<NewsListResponse>, AppError> {
    let language = parse_language(query.language.as_deref())?;
    let filter = NewsFilter {
        sub_category_ids: query.sub_category_ids().map_err(AppError::bad_request)?,
        category_id: query.category_id,
        search: query.search_term().map(str::to_owned),
    };

    let news = NewsService::get_filtered_news(&state.db, language, filter, &query.pagination()).await?;
    Ok(Json(news))
}

/// Same listing as `/v1/news/filtered`, exposed under the search path.
#[utoipa::path(
    get,
    path = "/v1/news/search",
    params(FilteredNewsQuery),
    responses(
        (status = 200, description = "Matching news, newest first", body = NewsListResponse),
        (status = 400, description = "Unsupported language or malformed subcategory id", body = ErrorResponse)
    ),
    tag = "News"
)]
pub async fn search_news(
    state: State<AppState>,
    query: ExtraQuery<FilteredNewsQuery>,
) -> Result<Json<NewsListResponse>, AppError> {
    get_filtered_news(state, query).await
}

#[utoipa::path(
    get,
    path = "/v1/news/get/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses(
        (status = 200, description = "News item", body = News),
        (status = 404, description = "News not found", body = ErrorResponse)
    ),
    tag = "News"
)]
#[instrument(skip(state))]
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<News>, AppError> {
    let news = NewsService::get_news(&state.db, id).await?;
    Ok(Json(news))
}

#[utoipa::path(
    put,
    path = "/v1/news/update/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    request_body = UpdateNewsDto,
    responses(
        (status = 200, description = "News updated", body = MessageResponse),
        (status = 404, description = "News not found", body = ErrorResponse)
    ),
    tag = "News",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateNewsDto>,
) -> Result<Json<MessageResponse>, AppError> {
    NewsService::update_news(&state.db, id, dto).await?;
    Ok(Json(MessageResponse::new("Yangilik muvaffaqiyatli yangilandi.")))
}

#[utoipa::path(
    delete,
    path = "/v1/news/delete/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses(
        (status = 200, description = "News deleted", body = MessageResponse),
        (status = 404, description = "News not found", body = ErrorResponse)
    ),
    tag = "News",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    NewsService::delete_news(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Yangilik muvaffaqiyatli o'chirildi.")))
}
