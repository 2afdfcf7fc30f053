use domain::Video;
use sqlx::SqlitePool;

const SELECT_VIDEO: &str = r#"
    SELECT movie_id, remote_id, key, name, site, video_type
    FROM videos
"#;

pub struct VideoRepository;

impl VideoRepository {
    /// Replace the full video set of a movie in one transaction.
    pub async fn replace_for_movie(
        pool: &SqlitePool,
        movie_id: i64,
        videos: &[Video],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM videos WHERE movie_id = $1")
            .bind(movie_id)
            .execute(&mut *tx)
            .await?;

        let mut written = 0;
        for video in videos {
            let result = sqlx::query(
                r#"
                INSERT OR REPLACE INTO videos (movie_id, remote_id, key, name, site, video_type)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(movie_id)
            .bind(&video.remote_id)
            .bind(&video.key)
            .bind(&video.name)
            .bind(&video.site)
            .bind(&video.video_type)
            .execute(&mut *tx)
            .await?;

            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    pub async fn get_by_movie(pool: &SqlitePool, movie_id: i64) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!("{} WHERE movie_id = $1 ORDER BY id ASC", SELECT_VIDEO);
        let rows = sqlx::query_as::<_, VideoRow>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VideoRow {
    movie_id: i64,
    remote_id: String,
    key: String,
    name: String,
    site: String,
    video_type: String,
}

impl From<VideoRow> for Video {
    fn from(row: VideoRow) -> Self {
        Self {
            owner_movie_id: row.movie_id,
            remote_id: row.remote_id,
            key: row.key,
            name: row.name,
            site: row.site,
            video_type: row.video_type,
        }
    }
}
