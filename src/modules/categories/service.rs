use std::collections::HashMap;

use sqlx::PgPool;
use tarkib_core::AppError;
use tarkib_models::Language;
use tarkib_models::categories::{
    AppendSubCategoryDto, Category, CategoryWithSubCategories, CreateCategoryDto, CreateSourceDto,
    Source, SubCategory, SubCategoryNames, UpdateCategoryDto,
};
use tracing::instrument;
use uuid::Uuid;

fn category_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Category not found"))
}

fn subcategory_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Subcategory not found"))
}

/// Maps a foreign key violation on `category_id` to 404.
fn map_missing_category(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_foreign_key_violation()
    {
        return category_not_found();
    }
    AppError::from(err)
}

pub struct CategoryService;

impl CategoryService {
    /// Inserts the category and its subcategories in one transaction.
    #[instrument(skip(db, dto))]
    pub async fn create_category(
        db: &PgPool,
        dto: CreateCategoryDto,
    ) -> Result<CategoryWithSubCategories, AppError> {
        let mut tx = db.begin().await?;

        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name_uz, name_ru) VALUES ($1, $2)
             RETURNING id, name_uz, name_ru",
        )
        .bind(&dto.name_uz)
        .bind(&dto.name_ru)
        .fetch_one(&mut *tx)
        .await?;

        let mut subcategories = Vec::with_capacity(dto.subcategories.len());
        for SubCategoryNames { name_uz, name_ru } in &dto.subcategories {
            let sub = sqlx::query_as::<_, SubCategory>(
                "INSERT INTO subcategories (category_id, name_uz, name_ru) VALUES ($1, $2, $3)
                 RETURNING id, category_id, name_uz, name_ru",
            )
            .bind(category.id)
            .bind(name_uz)
            .bind(name_ru)
            .fetch_one(&mut *tx)
            .await?;
            subcategories.push(sub);
        }

        tx.commit().await?;

        Ok(CategoryWithSubCategories::new(category, subcategories))
    }

    /// Renames the category and any listed subcategories that belong to it.
    #[instrument(skip(db, dto))]
    pub async fn update_category(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCategoryDto,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let result = sqlx::query("UPDATE categories SET name_uz = $2, name_ru = $3 WHERE id = $1")
            .bind(id)
            .bind(&dto.name_uz)
            .bind(&dto.name_ru)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(category_not_found());
        }

        for sub in &dto.subcategories {
            let result = sqlx::query(
                "UPDATE subcategories SET name_uz = $3, name_ru = $4
                 WHERE id = $1 AND category_id = $2",
            )
            .bind(sub.id)
            .bind(id)
            .bind(&sub.name_uz)
            .bind(&sub.name_ru)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(subcategory_not_found());
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Subcategories and their news links go with the category.
    #[instrument(skip(db))]
    pub async fn delete_category(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(category_not_found());
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get_categories(db: &PgPool) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name_uz, name_ru FROM categories ORDER BY created_at",
        )
        .fetch_all(db)
        .await?;
        Ok(categories)
    }

    #[instrument(skip(db))]
    pub async fn get_category(db: &PgPool, id: Uuid) -> Result<CategoryWithSubCategories, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name_uz, name_ru FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(category_not_found)?;

        let subcategories = Self::get_subcategories(db, id).await?;
        Ok(CategoryWithSubCategories::new(category, subcategories))
    }

    /// Every category with its subcategories, names in `language`.
    #[instrument(skip(db))]
    pub async fn get_categories_with_subcategories(
        db: &PgPool,
        language: Language,
    ) -> Result<Vec<CategoryWithSubCategories>, AppError> {
        let categories = Self::get_categories(db).await?;
        let subcategories = sqlx::query_as::<_, SubCategory>(
            "SELECT id, category_id, name_uz, name_ru FROM subcategories ORDER BY created_at",
        )
        .fetch_all(db)
        .await?;

        let mut by_category: HashMap<Uuid, Vec<SubCategory>> = HashMap::new();
        for sub in subcategories {
            by_category.entry(sub.category_id).or_default().push(sub);
        }

        Ok(categories
            .into_iter()
            .map(|category| {
                let subs = by_category.remove(&category.id).unwrap_or_default();
                CategoryWithSubCategories::new(category, subs).localized(language)
            })
            .collect())
    }

    #[instrument(skip(db, items))]
    pub async fn append_subcategories(
        db: &PgPool,
        items: Vec<AppendSubCategoryDto>,
    ) -> Result<Vec<SubCategory>, AppError> {
        let mut tx = db.begin().await?;
        let mut created = Vec::with_capacity(items.len());

        for item in &items {
            let sub = sqlx::query_as::<_, SubCategory>(
                "INSERT INTO subcategories (category_id, name_uz, name_ru) VALUES ($1, $2, $3)
                 RETURNING id, category_id, name_uz, name_ru",
            )
            .bind(item.category_id)
            .bind(&item.name_uz)
            .bind(&item.name_ru)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_missing_category)?;
            created.push(sub);
        }

        tx.commit().await?;
        Ok(created)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_subcategory(
        db: &PgPool,
        id: Uuid,
        dto: SubCategoryNames,
    ) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE subcategories SET name_uz = $2, name_ru = $3 WHERE id = $1")
            .bind(id)
            .bind(&dto.name_uz)
            .bind(&dto.name_ru)
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(subcategory_not_found());
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn delete_subcategory(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM subcategories WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(subcategory_not_found());
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get_subcategories(db: &PgPool, category_id: Uuid) -> Result<Vec<SubCategory>, AppError> {
        let subcategories = sqlx::query_as::<_, SubCategory>(
            "SELECT id, category_id, name_uz, name_ru FROM subcategories
             WHERE category_id = $1 ORDER BY created_at",
        )
        .bind(category_id)
        .fetch_all(db)
        .await?;
        Ok(subcategories)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_source(db: &PgPool, dto: CreateSourceDto) -> Result<Source, AppError> {
        let source = sqlx::query_as::<_, Source>(
            "INSERT INTO sources (site_name, site_url, site_image_url) VALUES ($1, $2, $3)
             RETURNING id, site_name, site_url, site_image_url",
        )
        .bind(&dto.site_name)
        .bind(&dto.site_url)
        .bind(&dto.site_image_url)
        .fetch_one(db)
        .await?;
        Ok(source)
    }

    #[instrument(skip(db))]
    pub async fn get_sources(db: &PgPool) -> Result<Vec<Source>, AppError> {
        let sources = sqlx::query_as::<_, Source>(
            "SELECT id, site_name, site_url, site_image_url FROM sources ORDER BY created_at",
        )
        .fetch_all(db)
        .await?;
        Ok(sources)
    }

    #[instrument(skip(db))]
    pub async fn delete_source(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sources WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Source not found")));
        }
        Ok(())
    }
}
