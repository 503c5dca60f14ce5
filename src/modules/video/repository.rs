use super::model::Video;
use crate::infrastructure::db::pool::DbPool;
use anyhow::Result;
use time::OffsetDateTime;
use uuid::Uuid;

pub struct VideoRepository;

impl VideoRepository {
    pub async fn create(pool: &DbPool, name: &str, path: &str) -> Result<Video> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (id, name, path, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(path)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(pool)
        .await?;

        Ok(video)
    }

    pub async fn get_by_id(pool: &DbPool, id: Uuid) -> Result<Option<Video>> {
        let video = sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(pool)
            .await?;

        Ok(video)
    }

    pub async fn set_transcription(pool: &DbPool, id: Uuid, transcription: &str) -> Result<()> {
        sqlx::query("UPDATE videos SET transcription = $1 WHERE id = $2")
            .bind(transcription)
            .bind(id.to_string())
            .execute(pool)
            .await?;

        Ok(())
    }
}
