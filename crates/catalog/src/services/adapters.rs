//! Adapter implementations for production types.
//!
//! Wraps the TMDB client so the pagination and detail services only see the
//! domain fetcher traits and the domain [`FetchError`] taxonomy.

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{DetailFetcher, FetchError, Movie, MoviePage, PageFetcher, Ranking, Review, Video};
use std::sync::Arc;
use tmdb::{MovieListItem, PaginatedResponse, TmdbClient, TmdbError};

/// Release dates are plain calendar dates.
const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Adapter for TmdbClient to implement the fetcher traits.
#[derive(Clone)]
pub struct TmdbSource {
    client: Arc<TmdbClient>,
}

impl TmdbSource {
    pub fn new(client: Arc<TmdbClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for TmdbSource {
    async fn fetch_page(&self, ranking: &Ranking, page: u32) -> Result<MoviePage, FetchError> {
        let response = self
            .client
            .get_movie_list(ranking.path, page)
            .await
            .map_err(fetch_error)?;

        to_movie_page(response)
    }
}

#[async_trait]
impl DetailFetcher for TmdbSource {
    async fn fetch_videos(&self, movie_id: i64) -> Result<Vec<Video>, FetchError> {
        let list = self
            .client
            .get_movie_videos(movie_id)
            .await
            .map_err(fetch_error)?;

        Ok(list
            .results
            .into_iter()
            .map(|v| Video {
                owner_movie_id: movie_id,
                remote_id: v.id,
                key: v.key,
                name: v.name,
                site: v.site,
                video_type: v.video_type,
            })
            .collect())
    }

    async fn fetch_reviews(&self, movie_id: i64) -> Result<Vec<Review>, FetchError> {
        let list = self
            .client
            .get_movie_reviews(movie_id)
            .await
            .map_err(fetch_error)?;

        Ok(list
            .results
            .into_iter()
            .map(|r| Review {
                owner_movie_id: movie_id,
                remote_id: r.id,
                author: r.author,
                content: r.content,
            })
            .collect())
    }
}

/// Map a client error onto the fetch taxonomy.
///
/// API failures carry TMDB's own status code when the body had one, the
/// HTTP status otherwise.
pub(crate) fn fetch_error(e: TmdbError) -> FetchError {
    match e {
        TmdbError::Request(e) => FetchError::Network(e.to_string()),
        e @ TmdbError::Json { .. } => FetchError::Parse(e.to_string()),
        TmdbError::Api {
            status_code,
            tmdb_code,
            message,
        } => FetchError::Api {
            code: tmdb_code.unwrap_or(i64::from(status_code)),
            message,
        },
    }
}

/// Convert a list response, failing the whole page on the first bad entry.
pub(crate) fn to_movie_page(
    response: PaginatedResponse<MovieListItem>,
) -> Result<MoviePage, FetchError> {
    let total_pages = u32::try_from(response.total_pages).map_err(|_| {
        FetchError::Parse(format!("total_pages: invalid value {}", response.total_pages))
    })?;

    let movies = response
        .results
        .into_iter()
        .enumerate()
        .map(|(index, item)| to_movie(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MoviePage {
        movies,
        total_pages,
    })
}

fn to_movie(index: usize, item: MovieListItem) -> Result<Movie, FetchError> {
    if item.id <= 0 {
        return Err(FetchError::Parse(format!(
            "results[{}].id: invalid value {}",
            index, item.id
        )));
    }

    let release_date = NaiveDate::parse_from_str(&item.release_date, RELEASE_DATE_FORMAT)
        .map_err(|e| {
            FetchError::Parse(format!(
                "results[{}].release_date: '{}' ({})",
                index, item.release_date, e
            ))
        })?;

    Ok(Movie {
        remote_id: item.id,
        title: item.title,
        poster_path: item.poster_path.filter(|p| !p.is_empty()),
        overview: item.overview,
        release_date,
        vote_average: item.vote_average,
        popularity: item.popularity,
    })
}
