use axum::http::StatusCode;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tarkib_auth::{Role, issue};
use tarkib_config::JwtConfig;
use tarkib_core::{AppError, hash_password, verify_password};
use tarkib_models::admins::{
    Admin, AdminLoginRequest, AdminLoginResponse, CreateAdminDto, EditAdminDto,
    EditSuperAdminDto, SuperAdmin, SuperAdminLoginRequest, SuperAdminLoginResponse,
};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::metrics::{
    track_jwt_issued, track_lockout, track_login_failure, track_login_success,
};
use crate::modules::auth::lockout::{AttemptOutcome, LoginAttemptTracker};

pub const ADMIN_NOT_FOUND: &str = "Bunday admin topilmadi.";
pub const ADMIN_BAD_CREDENTIALS: &str = "Username yoki parol xato kiritildi.";
pub const SUPERADMIN_BAD_CREDENTIALS: &str = "Telefon raqam yoki parol xato kiritildi.";
pub const SUPERADMIN_BLOCKED: &str = "Super admin is blocked.";

const ADMIN_COLUMNS: &str = "id, username, avatar, created_at";
const SUPERADMIN_COLUMNS: &str = "id, phone_number, avatar, is_blocked";

fn issue_access_token(subject: Uuid, role: Role, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let expires_at = Utc::now() + Duration::seconds(jwt_config.access_token_timeout);
    let token = issue(
        &subject.to_string(),
        role,
        expires_at,
        &jwt_config.audience,
        jwt_config.signing_key.as_bytes(),
    )?;
    track_jwt_issued();
    Ok(token)
}

fn map_username_conflict(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return AppError::conflict(anyhow::anyhow!("Bunday username allaqachon mavjud."));
    }
    AppError::from(err)
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username))]
    pub async fn admin_login(
        db: &PgPool,
        dto: AdminLoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AdminLoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct AdminWithPassword {
            #[sqlx(flatten)]
            admin: Admin,
            password: String,
        }

        let row = sqlx::query_as::<_, AdminWithPassword>(&format!(
            "SELECT {ADMIN_COLUMNS}, password FROM admins WHERE username = $1"
        ))
        .bind(&dto.username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            track_login_failure("admin", "not_found");
            AppError::msg(StatusCode::BAD_REQUEST, ADMIN_NOT_FOUND)
        })?;

        if !verify_password(&dto.password, &row.password)? {
            track_login_failure("admin", "bad_password");
            return Err(AppError::unauthorized(ADMIN_BAD_CREDENTIALS));
        }

        let access_token = issue_access_token(row.admin.id, Role::Admin, jwt_config)?;
        track_login_success("admin");

        Ok(AdminLoginResponse {
            access_token,
            admin: row.admin,
        })
    }

    /// Checks the per-phone lockout before touching the database. A wrong
    /// password counts against that phone number only.
    #[instrument(skip(db, attempts, dto, jwt_config), fields(phone_number = %dto.phone_number))]
    pub async fn superadmin_login(
        db: &PgPool,
        attempts: &LoginAttemptTracker,
        dto: SuperAdminLoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<SuperAdminLoginResponse, AppError> {
        if attempts.is_locked(&dto.phone_number) {
            track_login_failure("super-admin", "locked");
            return Err(AppError::forbidden(SUPERADMIN_BLOCKED));
        }

        #[derive(sqlx::FromRow)]
        struct SuperAdminWithPassword {
            #[sqlx(flatten)]
            superadmin: SuperAdmin,
            password: String,
        }

        let row = sqlx::query_as::<_, SuperAdminWithPassword>(&format!(
            "SELECT {SUPERADMIN_COLUMNS}, password FROM superadmins WHERE phone_number = $1"
        ))
        .bind(&dto.phone_number)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            track_login_failure("super-admin", "not_found");
            AppError::msg(StatusCode::BAD_REQUEST, ADMIN_NOT_FOUND)
        })?;

        if row.superadmin.is_blocked {
            track_login_failure("super-admin", "blocked");
            return Err(AppError::forbidden(SUPERADMIN_BLOCKED));
        }

        if !verify_password(&dto.password, &row.password)? {
            track_login_failure("super-admin", "bad_password");
            if let AttemptOutcome::Locked = attempts.record_failure(&dto.phone_number) {
                warn!("super admin locked after repeated failed logins");
                track_lockout("super-admin");
            }
            return Err(AppError::unauthorized(SUPERADMIN_BAD_CREDENTIALS));
        }

        attempts.reset(&dto.phone_number);

        let access_token = issue_access_token(row.superadmin.id, Role::SuperAdmin, jwt_config)?;
        track_login_success("super-admin");

        Ok(SuperAdminLoginResponse {
            access_token,
            superadmin: row.superadmin,
        })
    }

    #[instrument(skip(db, dto), fields(username = %dto.username))]
    pub async fn create_admin(db: &PgPool, dto: CreateAdminDto) -> Result<Admin, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let admin = sqlx::query_as::<_, Admin>(&format!(
            "INSERT INTO admins (username, password, avatar)
             VALUES ($1, $2, $3)
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(&dto.username)
        .bind(&hashed_password)
        .bind(&dto.avatar)
        .fetch_one(db)
        .await
        .map_err(map_username_conflict)?;

        Ok(admin)
    }

    #[instrument(skip(db))]
    pub async fn delete_admin(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(ADMIN_NOT_FOUND)));
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get_all_admins(db: &PgPool) -> Result<Vec<Admin>, AppError> {
        let admins = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await?;

        Ok(admins)
    }

    #[instrument(skip(db))]
    pub async fn get_admin(db: &PgPool, id: Uuid) -> Result<Admin, AppError> {
        sqlx::query_as::<_, Admin>(&format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!(ADMIN_NOT_FOUND)))
    }

    /// Replaces username and avatar; the password only when one is given.
    #[instrument(skip(db, dto), fields(admin_id = %dto.id))]
    pub async fn edit_admin(db: &PgPool, dto: EditAdminDto) -> Result<Admin, AppError> {
        let hashed_password = dto.password.as_deref().map(hash_password).transpose()?;

        sqlx::query_as::<_, Admin>(&format!(
            "UPDATE admins
             SET username = $2, avatar = $3, password = COALESCE($4, password)
             WHERE id = $1
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(dto.id)
        .bind(&dto.username)
        .bind(&dto.avatar)
        .bind(hashed_password)
        .fetch_optional(db)
        .await
        .map_err(map_username_conflict)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!(ADMIN_NOT_FOUND)))
    }

    #[instrument(skip(db, dto))]
    pub async fn edit_superadmin(
        db: &PgPool,
        id: Uuid,
        dto: EditSuperAdminDto,
    ) -> Result<SuperAdmin, AppError> {
        let hashed_password = dto.password.as_deref().map(hash_password).transpose()?;

        sqlx::query_as::<_, SuperAdmin>(&format!(
            "UPDATE superadmins
             SET phone_number = $2, avatar = $3, password = COALESCE($4, password)
             WHERE id = $1
             RETURNING {SUPERADMIN_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.phone_number)
        .bind(&dto.avatar)
        .bind(hashed_password)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Super admin not found")))
    }
}
