//! URL helpers for assets that are not served by the JSON API.

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Default poster width used by list screens.
pub const DEFAULT_POSTER_SIZE: &str = "w185";

/// Build an absolute poster URL from a relative `poster_path` (e.g. `/abc.jpg`).
pub fn poster_url(size: &str, poster_path: &str) -> String {
    let path = poster_path.trim_start_matches('/');
    format!("{}/{}/{}", IMAGE_BASE_URL, size, path)
}

/// Watch URL for a video hosted on YouTube, `None` for other sites.
pub fn video_url(site: &str, key: &str) -> Option<String> {
    if site.eq_ignore_ascii_case("youtube") {
        Some(format!("{}{}", YOUTUBE_WATCH_URL, key))
    } else {
        None
    }
}
