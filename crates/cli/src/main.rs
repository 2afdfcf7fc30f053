mod commands;

use clap::{Parser, Subcommand};
use domain::OrderingMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "popular-movies")]
#[command(version)]
#[command(about = "Browse TMDB's popular and top rated movies from a local cache", long_about = None)]
struct Cli {
    /// Directory holding the database and settings file
    #[arg(long, env = "MOVIES_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// TMDB v3 API key
    #[arg(long, env = "TMDB_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Language sent to TMDB, e.g. en-US
    #[arg(long, env = "TMDB_LANGUAGE")]
    language: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the cached movies of a mode (loads the first page if nothing is cached)
    List {
        /// most_popular, top_rated or favorite; defaults to the active mode
        #[arg(short, long)]
        mode: Option<OrderingMode>,
    },
    /// Load more pages of a mode
    More {
        #[arg(short, long)]
        mode: Option<OrderingMode>,
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Show or switch the active mode
    Mode { mode: Option<OrderingMode> },
    /// Manage favorites
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Show a movie with its videos and reviews
    Detail { id: i64 },
    /// Show paging state and freshness of every mode
    Status,
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// Save a cached movie to favorites
    Add {
        id: i64,
        /// Partition to take the movie from; searches all when omitted
        #[arg(long)]
        from: Option<OrderingMode>,
    },
    /// Remove a movie from favorites
    Remove { id: i64 },
    /// Add or remove a cached movie
    Toggle {
        id: i64,
        #[arg(long)]
        from: Option<OrderingMode>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if cli.api_key.is_empty() && needs_network(&cli.command) {
        tracing::warn!("No TMDB API key set; remote requests will fail (use --api-key or TMDB_API_KEY)");
    }

    let config = catalog::Config::new(cli.data_dir, cli.api_key).with_language(cli.language);
    let state = catalog::AppState::new(config).await?;

    match cli.command {
        Command::List { mode } => commands::list(&state, mode).await,
        Command::More { mode, pages } => commands::more(&state, mode, pages).await,
        Command::Mode { mode } => commands::mode(&state, mode).await,
        Command::Favorite { action } => match action {
            FavoriteAction::Add { id, from } => commands::favorite_add(&state, id, from).await,
            FavoriteAction::Remove { id } => commands::favorite_remove(&state, id).await,
            FavoriteAction::Toggle { id, from } => {
                commands::favorite_toggle(&state, id, from).await
            }
        },
        Command::Detail { id } => commands::detail(&state, id).await,
        Command::Status => commands::status(&state).await,
    }
}

fn needs_network(command: &Command) -> bool {
    matches!(
        command,
        Command::List { .. } | Command::More { .. } | Command::Mode { mode: Some(_) } | Command::Detail { .. }
    )
}
