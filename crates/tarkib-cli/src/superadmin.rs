use sqlx::PgPool;
use tarkib_core::hash_password;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SuperAdminError {
    #[error("a super admin with phone number {0} already exists")]
    AlreadyExists(String),
    #[error("no super admin with phone number {0}")]
    NotFound(String),
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Inserts a super-admin with a bcrypt-hashed password.
pub async fn create(db: &PgPool, phone_number: &str, password: &str) -> Result<Uuid, SuperAdminError> {
    let hashed = hash_password(password).map_err(|e| SuperAdminError::Hash(e.error.to_string()))?;

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO superadmins (phone_number, password)
         VALUES ($1, $2)
         ON CONFLICT (phone_number) DO NOTHING
         RETURNING id",
    )
    .bind(phone_number)
    .bind(&hashed)
    .fetch_optional(db)
    .await?;

    id.ok_or_else(|| SuperAdminError::AlreadyExists(phone_number.to_string()))
}

/// Clears `is_blocked` for the given phone number.
pub async fn unblock(db: &PgPool, phone_number: &str) -> Result<(), SuperAdminError> {
    let result = sqlx::query("UPDATE superadmins SET is_blocked = FALSE WHERE phone_number = $1")
        .bind(phone_number)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(SuperAdminError::NotFound(phone_number.to_string()));
    }
    Ok(())
}
