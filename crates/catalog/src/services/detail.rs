use domain::{DetailFetcher, DetailStore, FetchError};
use std::sync::Arc;

/// Result of refreshing one movie's detail data.
///
/// `None` means that half was not refreshed and the stored rows were left
/// untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailOutcome {
    pub videos: Option<u64>,
    pub reviews: Option<u64>,
}

impl DetailOutcome {
    pub fn is_complete(&self) -> bool {
        self.videos.is_some() && self.reviews.is_some()
    }
}

/// Refreshes the videos and reviews of a movie when its detail view opens.
pub struct DetailAugmentor {
    fetcher: Arc<dyn DetailFetcher>,
    store: Arc<dyn DetailStore>,
}

impl DetailAugmentor {
    pub fn new(fetcher: Arc<dyn DetailFetcher>, store: Arc<dyn DetailStore>) -> Self {
        Self { fetcher, store }
    }

    /// Fetch both sets concurrently and replace whichever succeeded.
    pub async fn augment(&self, movie_id: i64) -> DetailOutcome {
        let (videos, reviews) = tokio::join!(
            self.refresh_videos(movie_id),
            self.refresh_reviews(movie_id)
        );

        DetailOutcome { videos, reviews }
    }

    async fn refresh_videos(&self, movie_id: i64) -> Option<u64> {
        let videos = match self.fetcher.fetch_videos(movie_id).await {
            Ok(videos) => videos,
            Err(e) => {
                log_fetch_failure("videos", movie_id, &e);
                return None;
            }
        };

        match self.store.replace_videos(movie_id, &videos).await {
            Ok(written) => {
                tracing::debug!("Stored {} videos for movie {}", written, movie_id);
                Some(written)
            }
            Err(e) => {
                tracing::warn!("Failed to store videos for movie {}: {}", movie_id, e);
                None
            }
        }
    }

    async fn refresh_reviews(&self, movie_id: i64) -> Option<u64> {
        let reviews = match self.fetcher.fetch_reviews(movie_id).await {
            Ok(reviews) => reviews,
            Err(e) => {
                log_fetch_failure("reviews", movie_id, &e);
                return None;
            }
        };

        match self.store.replace_reviews(movie_id, &reviews).await {
            Ok(written) => {
                tracing::debug!("Stored {} reviews for movie {}", written, movie_id);
                Some(written)
            }
            Err(e) => {
                tracing::warn!("Failed to store reviews for movie {}: {}", movie_id, e);
                None
            }
        }
    }
}

fn log_fetch_failure(what: &str, movie_id: i64, e: &FetchError) {
    tracing::warn!(
        "Failed to fetch {} for movie {} ({}): {}",
        what,
        movie_id,
        e.kind(),
        e
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mocks::*;

    fn augmentor(fetcher: &MockDetailFetcher, store: &MockDetailStore) -> DetailAugmentor {
        DetailAugmentor::new(Arc::new(fetcher.clone()), Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn test_replaces_both_sets() {
        let fetcher = MockDetailFetcher::new();
        let store = MockDetailStore::new();
        store.seed_videos(550, vec![test_video(550, "old")]);
        fetcher.set_videos(Ok(vec![test_video(550, "a"), test_video(550, "b")]));
        fetcher.set_reviews(Ok(vec![test_review(550, "r1")]));

        let outcome = augmentor(&fetcher, &store).augment(550).await;

        assert_eq!(
            outcome,
            DetailOutcome {
                videos: Some(2),
                reviews: Some(1)
            }
        );
        assert!(outcome.is_complete());
        let ids: Vec<String> = store.videos_of(550).into_iter().map(|v| v.remote_id).collect();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.reviews_of(550).len(), 1);
    }

    #[tokio::test]
    async fn test_failed_half_leaves_rows_untouched() {
        let fetcher = MockDetailFetcher::new();
        let store = MockDetailStore::new();
        store.seed_videos(550, vec![test_video(550, "kept")]);
        fetcher.set_videos(Err(FetchError::Network("timed out".to_string())));
        fetcher.set_reviews(Ok(vec![test_review(550, "r1"), test_review(550, "r2")]));

        let outcome = augmentor(&fetcher, &store).augment(550).await;

        assert_eq!(outcome.videos, None);
        assert_eq!(outcome.reviews, Some(2));
        assert!(!outcome.is_complete());
        assert_eq!(store.videos_of(550)[0].remote_id, "kept");
        assert_eq!(store.reviews_of(550).len(), 2);
    }

    #[tokio::test]
    async fn test_both_fail() {
        let fetcher = MockDetailFetcher::new();
        let store = MockDetailStore::new();
        fetcher.set_videos(Err(FetchError::Api {
            code: 34,
            message: "not found".to_string(),
        }));
        fetcher.set_reviews(Err(FetchError::Parse("results[0].author".to_string())));

        let outcome = augmentor(&fetcher, &store).augment(1).await;

        assert_eq!(outcome, DetailOutcome::default());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_fetch_clears_set() {
        let fetcher = MockDetailFetcher::new();
        let store = MockDetailStore::new();
        store.seed_videos(9, vec![test_video(9, "gone")]);
        fetcher.set_videos(Ok(vec![]));
        fetcher.set_reviews(Ok(vec![]));

        let outcome = augmentor(&fetcher, &store).augment(9).await;

        assert_eq!(outcome.videos, Some(0));
        assert!(store.videos_of(9).is_empty());
    }
}
