use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Schema, applied idempotently on every start.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS movies (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        mode            TEXT NOT NULL,
        remote_id       INTEGER NOT NULL CHECK (remote_id > 0),
        title           TEXT NOT NULL,
        poster_path     TEXT,
        overview        TEXT NOT NULL,
        release_date    TEXT NOT NULL,
        vote_average    REAL NOT NULL,
        popularity      REAL NOT NULL,
        UNIQUE (mode, remote_id) ON CONFLICT REPLACE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_movies_mode ON movies(mode)",
    r#"
    CREATE TABLE IF NOT EXISTS favorite_movies (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        remote_id       INTEGER NOT NULL UNIQUE ON CONFLICT REPLACE CHECK (remote_id > 0),
        title           TEXT NOT NULL,
        poster_path     TEXT,
        overview        TEXT NOT NULL,
        release_date    TEXT NOT NULL,
        vote_average    REAL NOT NULL,
        popularity      REAL NOT NULL,
        saved_at        TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS videos (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        movie_id        INTEGER NOT NULL,
        remote_id       TEXT NOT NULL UNIQUE ON CONFLICT REPLACE,
        key             TEXT NOT NULL,
        name            TEXT NOT NULL,
        site            TEXT NOT NULL,
        video_type      TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_videos_movie_id ON videos(movie_id)",
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        movie_id        INTEGER NOT NULL,
        remote_id       TEXT NOT NULL UNIQUE ON CONFLICT REPLACE,
        author          TEXT NOT NULL,
        content         TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_reviews_movie_id ON reviews(movie_id)",
];

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    tracing::debug!("Database ready at {}", database_url);

    Ok(pool)
}

/// In-memory database on a single long-lived connection.
///
/// Each SQLite `:memory:` connection is its own database, so the pool must
/// never open a second one or recycle the first.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
