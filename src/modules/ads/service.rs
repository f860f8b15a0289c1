use sqlx::PgPool;
use tarkib_core::AppError;
use tarkib_models::ads::{Ad, CreateAdDto, UpdateAdDto};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::track_ad_view;

const AD_COLUMNS: &str = "id, link, image_url, view_count, created_at";

fn ad_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("ad not found"))
}

fn map_link_conflict(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return AppError::conflict(anyhow::anyhow!("ad is already exists"));
    }
    AppError::from(err)
}

pub struct AdService;

impl AdService {
    #[instrument(skip(db, dto))]
    pub async fn create_ad(db: &PgPool, dto: CreateAdDto) -> Result<Ad, AppError> {
        sqlx::query_as::<_, Ad>(&format!(
            "INSERT INTO ads (link, image_url) VALUES ($1, $2) RETURNING {AD_COLUMNS}"
        ))
        .bind(&dto.link)
        .bind(&dto.image_url)
        .fetch_one(db)
        .await
        .map_err(map_link_conflict)
    }

    #[instrument(skip(db, dto), fields(ad_id = %dto.id))]
    pub async fn update_ad(db: &PgPool, dto: UpdateAdDto) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE ads SET link = $2, image_url = $3 WHERE id = $1")
            .bind(dto.id)
            .bind(&dto.link)
            .bind(&dto.image_url)
            .execute(db)
            .await
            .map_err(map_link_conflict)?;
        if result.rows_affected() == 0 {
            return Err(ad_not_found());
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn delete_ad(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ad_not_found());
        }
        Ok(())
    }

    /// Public reads count a view and hide the counter; a super admin sees
    /// the stored count and does not add to it.
    #[instrument(skip(db))]
    pub async fn get_ad(db: &PgPool, id: Uuid, is_super_admin: bool) -> Result<Ad, AppError> {
        if is_super_admin {
            return sqlx::query_as::<_, Ad>(&format!("SELECT {AD_COLUMNS} FROM ads WHERE id = $1"))
                .bind(id)
                .fetch_optional(db)
                .await?
                .ok_or_else(ad_not_found);
        }

        let ad = sqlx::query_as::<_, Ad>(&format!(
            "UPDATE ads SET view_count = view_count + 1 WHERE id = $1 RETURNING {AD_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(ad_not_found)?;

        track_ad_view();
        Ok(ad.public())
    }

    #[instrument(skip(db))]
    pub async fn get_all_ads(db: &PgPool) -> Result<Vec<Ad>, AppError> {
        let ads = sqlx::query_as::<_, Ad>(&format!(
            "SELECT {AD_COLUMNS} FROM ads ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await?;
        Ok(ads)
    }
}
