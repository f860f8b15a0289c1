use std::collections::HashMap;

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tarkib_core::{AppError, PaginationParams};
use tarkib_models::Language;
use tarkib_models::news::{
    CreateNewsDto, CreatedNewsResponse, News, NewsListResponse, NewsRow, UpdateNewsDto,
};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::track_news_created;

const NEWS_COLUMNS: &str = "n.id, n.special_id, n.language, n.name, n.description, n.text, \
     n.image_url, n.voice_url, n.video_url, n.site_image_link, n.links, n.created_at";

fn news_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Yangilik topilmadi."))
}

/// Maps a foreign key violation on `subcategory_id` to 400.
fn map_unknown_subcategory(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_foreign_key_violation()
    {
        return AppError::bad_request(anyhow::anyhow!("Unknown subcategory id"));
    }
    AppError::from(err)
}

async fn link_subcategories(
    tx: &mut Transaction<'_, Postgres>,
    news_id: Uuid,
    sub_category_ids: &[Uuid],
) -> Result<(), AppError> {
    if sub_category_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO subcategory_news (subcategory_id, news_id)
         SELECT UNNEST($1::uuid[]), $2
         ON CONFLICT DO NOTHING",
    )
    .bind(sub_category_ids)
    .bind(news_id)
    .execute(&mut **tx)
    .await
    .map_err(map_unknown_subcategory)?;

    Ok(())
}

/// Loads subcategory associations for `rows` in one query.
async fn with_subcategories(db: &PgPool, rows: Vec<NewsRow>) -> Result<Vec<News>, AppError> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let links = sqlx::query_as::<_, (Uuid, Uuid)>(
        "SELECT news_id, subcategory_id FROM subcategory_news WHERE news_id = ANY($1)",
    )
    .bind(&ids)
    .fetch_all(db)
    .await?;

    let mut by_news: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (news_id, subcategory_id) in links {
        by_news.entry(news_id).or_default().push(subcategory_id);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let subs = by_news.remove(&row.id).unwrap_or_default();
            News::from_row(row, subs)
        })
        .collect())
}

async fn page(
    db: &PgPool,
    mut rows: Vec<NewsRow>,
    pagination: &PaginationParams,
) -> Result<NewsListResponse, AppError> {
    let meta = pagination.meta(rows.len());
    rows.truncate(pagination.limit() as usize);
    Ok(NewsListResponse {
        news: with_subcategories(db, rows).await?,
        meta,
    })
}

/// Search and subcategory constraints for [`NewsService::get_filtered_news`].
#[derive(Debug, Default)]
pub struct NewsFilter {
    pub sub_category_ids: Vec<Uuid>,
    pub category_id: Option<Uuid>,
    pub search: Option<String>,
}

pub struct NewsService;

impl NewsService {
    /// Inserts the Uzbek and Russian rows under a fresh `special_id`.
    #[instrument(skip(db, dto))]
    pub async fn create_news(db: &PgPool, dto: CreateNewsDto) -> Result<CreatedNewsResponse, AppError> {
        let special_id = Uuid::new_v4();
        let mut tx = db.begin().await?;
        let mut ids = Vec::with_capacity(2);

        for content in dto.contents() {
            let id = sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO news (special_id, language, name, description, text, image_url,
                                   voice_url, video_url, site_image_link, links)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                 RETURNING id",
            )
            .bind(special_id)
            .bind(content.language.as_str())
            .bind(&content.name)
            .bind(&content.description)
            .bind(&content.text)
            .bind(&dto.image_url)
            .bind(&dto.voice_url)
            .bind(&dto.video_url)
            .bind(&dto.site_image_link)
            .bind(Json(&dto.links))
            .fetch_one(&mut *tx)
            .await?;

            link_subcategories(&mut tx, id, &dto.sub_category_ids).await?;
            ids.push(id);
        }

        tx.commit().await?;
        track_news_created();

        Ok(CreatedNewsResponse { special_id, ids })
    }

    #[instrument(skip(db))]
    pub async fn get_all_news(
        db: &PgPool,
        language: Language,
        pagination: &PaginationParams,
    ) -> Result<NewsListResponse, AppError> {
        let rows = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news n
             WHERE n.language = $1
             ORDER BY n.created_at DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(language.as_str())
        .bind(pagination.limit() + 1)
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        page(db, rows, pagination).await
    }

    /// Lists news in `language` narrowed by subcategories and a search term.
    ///
    /// Explicit subcategory ids win over `category_id`; a category without
    /// subcategories matches nothing.
    #[instrument(skip(db))]
    pub async fn get_filtered_news(
        db: &PgPool,
        language: Language,
        filter: NewsFilter,
        pagination: &PaginationParams,
    ) -> Result<NewsListResponse, AppError> {
        let mut sub_category_ids = filter.sub_category_ids;
        if sub_category_ids.is_empty()
            && let Some(category_id) = filter.category_id
        {
            sub_category_ids = sqlx::query_scalar::<_, Uuid>(
                "SELECT id FROM subcategories WHERE category_id = $1",
            )
            .bind(category_id)
            .fetch_all(db)
            .await?;

            if sub_category_ids.is_empty() {
                return Ok(NewsListResponse {
                    news: Vec::new(),
                    meta: pagination.meta(0),
                });
            }
        }

        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {NEWS_COLUMNS} FROM news n"));
        query.push(" WHERE n.language = ").push_bind(language.as_str());

        if !sub_category_ids.is_empty() {
            query
                .push(
                    " AND EXISTS (SELECT 1 FROM subcategory_news sn \
                     WHERE sn.news_id = n.id AND sn.subcategory_id = ANY(",
                )
                .push_bind(sub_category_ids)
                .push("))");
        }

        if let Some(search) = filter.search {
            let pattern = like_pattern(&search);
            query
                .push(" AND (n.name ILIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR n.description ILIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }

        query
            .push(" ORDER BY n.created_at DESC LIMIT ")
            .push_bind(pagination.limit() + 1)
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows = query.build_query_as::<NewsRow>().fetch_all(db).await?;
        page(db, rows, pagination).await
    }

    #[instrument(skip(db))]
    pub async fn get_news(db: &PgPool, id: Uuid) -> Result<News, AppError> {
        let row = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news n WHERE n.id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(news_not_found)?;

        let mut news = with_subcategories(db, vec![row]).await?;
        news.pop().ok_or_else(news_not_found)
    }

    /// Replaces one language row's content and its subcategory links.
    #[instrument(skip(db, dto))]
    pub async fn update_news(db: &PgPool, id: Uuid, dto: UpdateNewsDto) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let result = sqlx::query(
            "UPDATE news
             SET name = $2, description = $3, text = $4, image_url = $5, voice_url = $6,
                 video_url = $7, site_image_link = $8, links = $9
             WHERE id = $1",
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.text)
        .bind(&dto.image_url)
        .bind(&dto.voice_url)
        .bind(&dto.video_url)
        .bind(&dto.site_image_link)
        .bind(Json(&dto.links))
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(news_not_found());
        }

        sqlx::query("DELETE FROM subcategory_news WHERE news_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        link_subcategories(&mut tx, id, &dto.sub_category_ids).await?;

        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn delete_news(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(news_not_found());
        }
        Ok(())
    }
}

/// Wraps a search term for `ILIKE ... ESCAPE '\'`, matching its wildcard
/// characters literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
