use chrono::{DateTime, NaiveDate, Utc};
use domain::{FavoriteMovie, Movie};
use sqlx::SqlitePool;

const SELECT_FAVORITE: &str = r#"
    SELECT
        remote_id, title, poster_path, overview,
        release_date, vote_average, popularity, saved_at
    FROM favorite_movies
"#;

/// The user's saved movies. Never fetched, never expired.
pub struct FavoriteRepository;

impl FavoriteRepository {
    /// Save a movie, replacing an earlier entry with the same TMDB ID.
    pub async fn upsert(
        pool: &SqlitePool,
        movie: &Movie,
        saved_at: DateTime<Utc>,
    ) -> Result<FavoriteMovie, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO favorite_movies (
                remote_id, title, poster_path, overview,
                release_date, vote_average, popularity, saved_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(movie.remote_id)
        .bind(&movie.title)
        .bind(&movie.poster_path)
        .bind(&movie.overview)
        .bind(movie.release_date)
        .bind(movie.vote_average)
        .bind(movie.popularity)
        .bind(saved_at)
        .execute(pool)
        .await?;

        Self::get_by_remote_id(pool, movie.remote_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Delete a favorite by TMDB ID
    pub async fn delete(pool: &SqlitePool, remote_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorite_movies WHERE remote_id = $1")
            .bind(remote_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &SqlitePool, remote_id: i64) -> Result<bool, sqlx::Error> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM favorite_movies WHERE remote_id = $1")
                .bind(remote_id)
                .fetch_optional(pool)
                .await?;

        Ok(found.is_some())
    }

    pub async fn get_by_remote_id(
        pool: &SqlitePool,
        remote_id: i64,
    ) -> Result<Option<FavoriteMovie>, sqlx::Error> {
        let query = format!("{} WHERE remote_id = $1", SELECT_FAVORITE);
        let row = sqlx::query_as::<_, FavoriteRow>(&query)
            .bind(remote_id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Get all favorites in the order they were saved
    pub async fn get_all(pool: &SqlitePool) -> Result<Vec<FavoriteMovie>, sqlx::Error> {
        let query = format!("{} ORDER BY id ASC", SELECT_FAVORITE);
        let rows = sqlx::query_as::<_, FavoriteRow>(&query)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FavoriteRow {
    remote_id: i64,
    title: String,
    poster_path: Option<String>,
    overview: String,
    release_date: NaiveDate,
    vote_average: f64,
    popularity: f64,
    saved_at: DateTime<Utc>,
}

impl From<FavoriteRow> for FavoriteMovie {
    fn from(row: FavoriteRow) -> Self {
        Self {
            movie: Movie {
                remote_id: row.remote_id,
                title: row.title,
                poster_path: row.poster_path,
                overview: row.overview,
                release_date: row.release_date,
                vote_average: row.vote_average,
                popularity: row.popularity,
            },
            saved_at: row.saved_at,
        }
    }
}
