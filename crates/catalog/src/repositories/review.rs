use domain::Review;
use sqlx::SqlitePool;

const SELECT_REVIEW: &str = r#"
    SELECT movie_id, remote_id, author, content
    FROM reviews
"#;

pub struct ReviewRepository;

impl ReviewRepository {
    /// Replace the full review set of a movie in one transaction.
    pub async fn replace_for_movie(
        pool: &SqlitePool,
        movie_id: i64,
        reviews: &[Review],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM reviews WHERE movie_id = $1")
            .bind(movie_id)
            .execute(&mut *tx)
            .await?;

        let mut written = 0;
        for review in reviews {
            let result = sqlx::query(
                r#"
                INSERT OR REPLACE INTO reviews (movie_id, remote_id, author, content)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(movie_id)
            .bind(&review.remote_id)
            .bind(&review.author)
            .bind(&review.content)
            .execute(&mut *tx)
            .await?;

            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    pub async fn get_by_movie(pool: &SqlitePool, movie_id: i64) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!("{} WHERE movie_id = $1 ORDER BY id ASC", SELECT_REVIEW);
        let rows = sqlx::query_as::<_, ReviewRow>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    movie_id: i64,
    remote_id: String,
    author: String,
    content: String,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            owner_movie_id: row.movie_id,
            remote_id: row.remote_id,
            author: row.author,
            content: row.content,
        }
    }
}
