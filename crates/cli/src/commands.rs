//! Subcommand implementations.

use catalog::services::{freshness, PageOutcome};
use catalog::AppState;
use chrono::Utc;
use domain::{CatalogCache, DetailStore, DomainError, Movie, OrderingMode, SettingsStore};
use tmdb::image::{poster_url, video_url, DEFAULT_POSTER_SIZE};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

async fn resolve_mode(state: &AppState, mode: Option<OrderingMode>) -> OrderingMode {
    match mode {
        Some(mode) => mode,
        None => state.settings.active_mode().await,
    }
}

pub async fn list(state: &AppState, mode: Option<OrderingMode>) -> CommandResult {
    // Without an explicit mode this is the startup check for the active mode
    let (mode, outcome) = match mode {
        Some(mode) => (mode, state.sync.ensure_initialized(mode).await?),
        None => (
            state.settings.active_mode().await,
            state.sync.initialize().await?,
        ),
    };
    if needs_attention(&outcome) {
        println!("{}", describe(&outcome));
    }

    let movies = state.catalog.query(mode).await?;
    if movies.is_empty() {
        println!("No {} movies cached.", mode);
        return Ok(());
    }

    println!("{} ({} movies)", mode, movies.len());
    for (rank, movie) in movies.iter().enumerate() {
        let marker = if state.catalog.is_favorite(movie.remote_id).await? {
            "*"
        } else {
            " "
        };
        println!("{}{:>4}. {}", marker, rank + 1, summary(movie));
    }
    Ok(())
}

pub async fn more(state: &AppState, mode: Option<OrderingMode>, pages: u32) -> CommandResult {
    let mode = resolve_mode(state, mode).await;

    for _ in 0..pages {
        let outcome = state.sync.next_page(mode).await?;
        println!("{}", describe(&outcome));
        if !outcome.is_loaded() {
            break;
        }
    }

    println!(
        "{} now has {} cached movies.",
        mode,
        state.catalog.count(mode).await?
    );
    Ok(())
}

pub async fn mode(state: &AppState, mode: Option<OrderingMode>) -> CommandResult {
    match mode {
        None => println!("{}", state.settings.active_mode().await),
        Some(mode) => {
            let outcome = state.sync.switch_mode(mode).await?;
            println!("Active mode: {}", mode);
            println!("{}", describe(&outcome));
        }
    }
    Ok(())
}

async fn cached_movie(
    state: &AppState,
    id: i64,
    from: Option<OrderingMode>,
) -> Result<Movie, DomainError> {
    let found = match from {
        Some(mode) => state.catalog.find(mode, id).await?,
        None => state.catalog.find_any(id).await?,
    };

    found.ok_or_else(|| DomainError::NotFound {
        entity_type: "movie",
        id: id.to_string(),
    })
}

pub async fn favorite_add(state: &AppState, id: i64, from: Option<OrderingMode>) -> CommandResult {
    let movie = cached_movie(state, id, from).await?;
    let favorite = state.catalog.add_favorite(&movie).await?;
    println!(
        "Saved '{}' at {}",
        favorite.movie.title,
        favorite.saved_at.format("%Y-%m-%d %H:%M")
    );
    Ok(())
}

pub async fn favorite_remove(state: &AppState, id: i64) -> CommandResult {
    if state.catalog.remove_favorite(id).await? {
        println!("Removed movie {} from favorites", id);
    } else {
        println!("Movie {} is not a favorite", id);
    }
    Ok(())
}

pub async fn favorite_toggle(
    state: &AppState,
    id: i64,
    from: Option<OrderingMode>,
) -> CommandResult {
    let movie = cached_movie(state, id, from).await?;
    if state.catalog.toggle_favorite(&movie).await? {
        println!("Saved '{}' to favorites", movie.title);
    } else {
        println!("Removed '{}' from favorites", movie.title);
    }
    Ok(())
}

pub async fn detail(state: &AppState, id: i64) -> CommandResult {
    let movie = cached_movie(state, id, None).await?;
    let outcome = state.sync.open_detail(id).await?;

    println!("{}", movie.title);
    println!("Released {}  Rating {:.1}  Popularity {:.1}", movie.release_date, movie.vote_average, movie.popularity);
    if let Some(path) = &movie.poster_path {
        println!("Poster: {}", poster_url(DEFAULT_POSTER_SIZE, path));
    }
    if state.catalog.is_favorite(id).await? {
        println!("In favorites");
    }
    println!();
    println!("{}", movie.overview);

    let videos = state.catalog.videos(id).await?;
    println!();
    println!("Videos ({}){}", videos.len(), stale_marker(outcome.videos));
    for video in &videos {
        let link = video_url(&video.site, &video.key).unwrap_or_else(|| video.site.clone());
        println!("  [{}] {} {}", video.video_type, video.name, link);
    }

    let reviews = state.catalog.reviews(id).await?;
    println!();
    println!("Reviews ({}){}", reviews.len(), stale_marker(outcome.reviews));
    for review in &reviews {
        println!("  {}:", review.author);
        println!("    {}", excerpt(&review.content, 300));
    }

    if !outcome.is_complete() {
        tracing::debug!("Detail refresh for {} incomplete: {:?}", id, outcome);
    }
    Ok(())
}

pub async fn status(state: &AppState) -> CommandResult {
    let now = Utc::now();
    let active = state.settings.active_mode().await;

    for mode in OrderingMode::ALL {
        let marker = if mode == active { "*" } else { " " };
        let count = state.catalog.count(mode).await?;

        match mode.ranking() {
            Some(ranking) => {
                let page = state.settings.page_state(ranking).await;
                let fresh = freshness::is_mode_fresh(state.settings.as_ref(), mode, now).await;
                let refreshed = page
                    .last_refreshed_at
                    .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                    .unwrap_or_else(|| "never".to_string());
                println!(
                    "{} {:<13} {:>5} movies  page {}/{}  refreshed {} ({})",
                    marker,
                    mode,
                    count,
                    page.current_page,
                    page.total_pages,
                    refreshed,
                    if fresh { "fresh" } else { "stale" }
                );
            }
            None => println!("{} {:<13} {:>5} movies", marker, mode, count),
        }
    }
    Ok(())
}

fn summary(movie: &Movie) -> String {
    format!(
        "{} ({})  {:.1}  id {}",
        movie.title,
        movie.year(),
        movie.vote_average,
        movie.remote_id
    )
}

fn describe(outcome: &PageOutcome) -> String {
    match outcome {
        PageOutcome::Loaded {
            page,
            inserted,
            total_pages,
        } => format!("Loaded page {}/{} ({} movies)", page, total_pages, inserted),
        PageOutcome::FullyLoaded => "All pages loaded".to_string(),
        PageOutcome::Skipped(reason) => format!("Nothing to do ({:?})", reason),
        PageOutcome::NotAdvanced { page } => format!("Page {} returned no movies, try again", page),
        PageOutcome::Failed(e) => format!("Could not load a page: {}", e),
    }
}

/// Outcomes worth telling the user about when they only asked for a listing.
fn needs_attention(outcome: &PageOutcome) -> bool {
    matches!(
        outcome,
        PageOutcome::Failed(_) | PageOutcome::NotAdvanced { .. }
    )
}

fn stale_marker(refreshed: Option<u64>) -> &'static str {
    match refreshed {
        Some(_) => "",
        None => " (cached, refresh failed)",
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim().replace('\n', " ");
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text,
    }
}
