use chrono::NaiveDate;
use domain::Movie;
use sqlx::SqlitePool;

/// Common SELECT fields for movie queries
const SELECT_MOVIE: &str = r#"
    SELECT
        remote_id, title, poster_path, overview,
        release_date, vote_average, popularity
    FROM movies
"#;

/// Cached partitions of the server-ordered lists, one `mode` value per partition.
pub struct MovieRepository;

impl MovieRepository {
    /// Insert-or-replace a page of movies into a partition in one transaction.
    ///
    /// Returns the number of rows written. Any failing row rolls back the
    /// whole batch.
    pub async fn insert_batch(
        pool: &SqlitePool,
        mode: &str,
        movies: &[Movie],
    ) -> Result<u64, sqlx::Error> {
        if movies.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;
        let mut written = 0;

        for movie in movies {
            let result = sqlx::query(
                r#"
                INSERT OR REPLACE INTO movies (
                    mode, remote_id, title, poster_path, overview,
                    release_date, vote_average, popularity
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(mode)
            .bind(movie.remote_id)
            .bind(&movie.title)
            .bind(&movie.poster_path)
            .bind(&movie.overview)
            .bind(movie.release_date)
            .bind(movie.vote_average)
            .bind(movie.popularity)
            .execute(&mut *tx)
            .await?;

            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    /// Delete every movie of a partition
    pub async fn delete_by_mode(pool: &SqlitePool, mode: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE mode = $1")
            .bind(mode)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Get all movies of a partition, highest `order_column` first.
    ///
    /// `order_column` must be a trusted column name.
    pub async fn list_by_mode(
        pool: &SqlitePool,
        mode: &str,
        order_column: &str,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "{} WHERE mode = $1 ORDER BY {} DESC, id ASC",
            SELECT_MOVIE, order_column
        );
        let rows = sqlx::query_as::<_, MovieRow>(&query)
            .bind(mode)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a movie of a partition by TMDB ID
    pub async fn get_by_remote_id(
        pool: &SqlitePool,
        mode: &str,
        remote_id: i64,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("{} WHERE mode = $1 AND remote_id = $2", SELECT_MOVIE);
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(mode)
            .bind(remote_id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    pub async fn count_by_mode(pool: &SqlitePool, mode: &str) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies WHERE mode = $1")
            .bind(mode)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

/// Internal row type for mapping SQLite results
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MovieRow {
    remote_id: i64,
    title: String,
    poster_path: Option<String>,
    overview: String,
    release_date: NaiveDate,
    vote_average: f64,
    popularity: f64,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Self {
            remote_id: row.remote_id,
            title: row.title,
            poster_path: row.poster_path,
            overview: row.overview,
            release_date: row.release_date,
            vote_average: row.vote_average,
            popularity: row.popularity,
        }
    }
}
