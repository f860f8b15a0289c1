use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tarkib_core::AppError;
use tarkib_models::ads::{Ad, AdListResponse, CreateAdDto, UpdateAdDto};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::gate::FORBIDDEN_MESSAGE;
use crate::modules::ads::service::AdService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/v1/ads/",
    request_body = CreateAdDto,
    responses(
        (status = 201, description = "Ad created", body = Ad),
        (status = 409, description = "An ad with this link exists", body = ErrorResponse)
    ),
    tag = "Ads",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_ad(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAdDto>,
) -> Result<(StatusCode, Json<Ad>), AppError> {
    let ad = AdService::create_ad(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(ad)))
}

#[utoipa::path(
    put,
    path = "/v1/ads/",
    request_body = UpdateAdDto,
    responses(
        (status = 204, description = "Ad updated"),
        (status = 404, description = "Ad not found", body = ErrorResponse)
    ),
    tag = "Ads",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_ad(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<UpdateAdDto>,
) -> Result<StatusCode, AppError> {
    AdService::update_ad(&state.db, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/v1/ads/{id}",
    params(("id" = Uuid, Path, description = "Ad ID")),
    responses(
        (status = 204, description = "Ad deleted"),
        (status = 404, description = "Ad not found", body = ErrorResponse)
    ),
    tag = "Ads",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_ad(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AdService::delete_ad(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch one ad
///
/// Anonymous and admin reads increment the view counter and report it as 0.
#[utoipa::path(
    get,
    path = "/v1/ads/{id}",
    params(("id" = Uuid, Path, description = "Ad ID")),
    responses(
        (status = 200, description = "Ad", body = Ad),
        (status = 404, description = "Ad not found", body = ErrorResponse)
    ),
    tag = "Ads"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_ad(
    State(state): State<AppState>,
    auth_user: Option<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ad>, AppError> {
    let is_super_admin = auth_user.is_some_and(|user| user.is_super_admin());
    let ad = AdService::get_ad(&state.db, id, is_super_admin).await?;
    Ok(Json(ad))
}

/// List every ad
///
/// `/v1/ads/{id}` is readable anonymously and its pattern also matches
/// `all`, so the role is checked again here.
#[utoipa::path(
    get,
    path = "/v1/ads/all",
    responses(
        (status = 200, description = "All ads, newest first", body = AdListResponse),
        (status = 403, description = "Not a super-admin", body = ErrorResponse)
    ),
    tag = "Ads",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_all_ads(
    State(state): State<AppState>,
    auth_user: Option<AuthUser>,
) -> Result<Json<AdListResponse>, AppError> {
    auth_user
        .ok_or_else(|| AppError::forbidden(FORBIDDEN_MESSAGE))?
        .require_super_admin()?;
    let ads = AdService::get_all_ads(&state.db).await?;
    Ok(Json(AdListResponse { ads }))
}
