use crate::{
    models::{MovieListItem, PaginatedResponse, ReviewList, VideoList},
    TmdbClient,
};

impl TmdbClient {
    /// Get one page of a ranked movie list.
    ///
    /// GET /movie/{ranking}?page={page}
    ///
    /// `ranking` is the list path, e.g. `popular` or `top_rated`. Pages are 1-indexed.
    pub async fn get_movie_list(
        &self,
        ranking: &str,
        page: u32,
    ) -> crate::Result<PaginatedResponse<MovieListItem>> {
        self.get(
            &format!("/movie/{}", ranking),
            &[("page", page.to_string())],
        )
        .await
    }

    /// Get the videos (trailers, teasers, clips) of a movie.
    ///
    /// GET /movie/{movie_id}/videos
    pub async fn get_movie_videos(&self, movie_id: i64) -> crate::Result<VideoList> {
        self.get(&format!("/movie/{}/videos", movie_id), &[]).await
    }

    /// Get the first page of user reviews of a movie.
    ///
    /// GET /movie/{movie_id}/reviews
    pub async fn get_movie_reviews(&self, movie_id: i64) -> crate::Result<ReviewList> {
        self.get(&format!("/movie/{}/reviews", movie_id), &[]).await
    }
}
