use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tarkib_core::AppError;
use tarkib_models::MessageResponse;
use tarkib_models::admins::{
    Admin, AdminListResponse, AdminLoginRequest, AdminLoginResponse, CreateAdminDto,
    EditAdminDto, EditSuperAdminDto, SuperAdmin, SuperAdminLoginRequest, SuperAdminLoginResponse,
};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Log in as an admin
#[utoipa::path(
    post,
    path = "/v1/auth/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AdminLoginResponse),
        (status = 400, description = "Unknown username or invalid body", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse)
    ),
    tag = "Auth"
)]
#[instrument(skip(state, dto))]
pub async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    let response = AuthService::admin_login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Log in as the super admin
#[utoipa::path(
    post,
    path = "/v1/auth/superadmin/login",
    request_body = SuperAdminLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SuperAdminLoginResponse),
        (status = 400, description = "Unknown phone number or invalid body", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 403, description = "Account blocked or locked after failed attempts", body = ErrorResponse)
    ),
    tag = "Auth"
)]
#[instrument(skip(state, dto))]
pub async fn superadmin_login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SuperAdminLoginRequest>,
) -> Result<Json<SuperAdminLoginResponse>, AppError> {
    let response =
        AuthService::superadmin_login(&state.db, &state.login_attempts, dto, &state.jwt_config)
            .await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/v1/auth/admin/create",
    request_body = CreateAdminDto,
    responses(
        (status = 201, description = "Admin created", body = MessageResponse),
        (status = 409, description = "Username taken", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Auth",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_admin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAdminDto>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    AuthService::create_admin(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Admin muvaffaqiyatli yaratildi")),
    ))
}

#[utoipa::path(
    delete,
    path = "/v1/auth/admin/delete/{id}",
    params(("id" = Uuid, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin deleted", body = MessageResponse),
        (status = 404, description = "Admin not found", body = ErrorResponse)
    ),
    tag = "Auth",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::delete_admin(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Admin muvaffaqiyatli o'chirildi")))
}

#[utoipa::path(
    get,
    path = "/v1/auth/admin/getall",
    responses(
        (status = 200, description = "All admins", body = AdminListResponse),
        (status = 403, description = "Not a super-admin", body = ErrorResponse)
    ),
    tag = "Auth",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_all_admins(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<AdminListResponse>, AppError> {
    auth_user.require_super_admin()?;
    let admins = AuthService::get_all_admins(&state.db).await?;
    Ok(Json(AdminListResponse { admins }))
}

#[utoipa::path(
    put,
    path = "/v1/auth/admin/edit",
    request_body = EditAdminDto,
    responses(
        (status = 200, description = "Admin updated", body = MessageResponse),
        (status = 404, description = "Admin not found", body = ErrorResponse)
    ),
    tag = "Auth",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn edit_admin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<EditAdminDto>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::edit_admin(&state.db, dto).await?;
    Ok(Json(MessageResponse::new("Admin muvaffaqiyatli yangilandi.")))
}

#[utoipa::path(
    get,
    path = "/v1/auth/admin/{id}",
    params(("id" = Uuid, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin", body = Admin),
        (status = 404, description = "Admin not found", body = ErrorResponse)
    ),
    tag = "Auth",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Admin>, AppError> {
    let admin = AuthService::get_admin(&state.db, id).await?;
    Ok(Json(admin))
}

/// Edit the calling super admin's own account
#[utoipa::path(
    put,
    path = "/v1/auth/superadmin/edit",
    request_body = EditSuperAdminDto,
    responses(
        (status = 200, description = "Super admin updated", body = SuperAdmin),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Auth",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn edit_superadmin(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<EditSuperAdminDto>,
) -> Result<Json<SuperAdmin>, AppError> {
    let id = auth_user.subject_id()?;
    let superadmin = AuthService::edit_superadmin(&state.db, id, dto).await?;
    Ok(Json(superadmin))
}
