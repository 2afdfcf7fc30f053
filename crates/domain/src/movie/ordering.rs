//! Ordering modes and the ranking lookup table.
//!
//! Everything that differs between the server-side rankings (request path,
//! refresh interval, settings key, sort column) is data in [`RANKINGS`].
//! Adding a ranking is adding a row.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Movie;
use crate::error::DomainError;

/// Which list the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingMode {
    /// Server ranking by popularity.
    #[default]
    MostPopular,
    /// Server ranking by vote average.
    TopRated,
    /// Locally curated, never fetched.
    Favorite,
}

impl OrderingMode {
    pub const ALL: [OrderingMode; 3] = [
        OrderingMode::MostPopular,
        OrderingMode::TopRated,
        OrderingMode::Favorite,
    ];

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderingMode::MostPopular => "most_popular",
            OrderingMode::TopRated => "top_rated",
            OrderingMode::Favorite => "favorite",
        }
    }

    /// The ranking row for server-ordered modes, `None` for favorites.
    pub fn ranking(self) -> Option<&'static Ranking> {
        RANKINGS.iter().find(|r| r.mode == self)
    }

    /// Check if this is the favorites set.
    pub fn is_favorite(&self) -> bool {
        matches!(self, OrderingMode::Favorite)
    }
}

impl FromStr for OrderingMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "most_popular" | "popular" => Ok(OrderingMode::MostPopular),
            "top_rated" => Ok(OrderingMode::TopRated),
            "favorite" | "favorites" => Ok(OrderingMode::Favorite),
            other => Err(DomainError::Validation(format!(
                "unknown ordering mode '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for OrderingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Numeric field a partition is sorted by, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Popularity,
    VoteAverage,
}

impl SortField {
    /// Column name in the movies table.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Popularity => "popularity",
            SortField::VoteAverage => "vote_average",
        }
    }

    pub fn value_of(&self, movie: &Movie) -> f64 {
        match self {
            SortField::Popularity => movie.popularity,
            SortField::VoteAverage => movie.vote_average,
        }
    }
}

/// Per-mode strategy for a server-ordered list.
#[derive(Debug, PartialEq, Eq)]
pub struct Ranking {
    pub mode: OrderingMode,
    /// Path segment under `/movie/`.
    pub path: &'static str,
    /// How long a fetched page set stays valid.
    pub refresh_interval_hours: i64,
    /// Key under which paging state is persisted.
    pub settings_key: &'static str,
    pub sort_field: SortField,
}

impl Ranking {
    pub fn refresh_interval(&self) -> Duration {
        Duration::hours(self.refresh_interval_hours)
    }
}

pub static RANKINGS: [Ranking; 2] = [
    Ranking {
        mode: OrderingMode::MostPopular,
        path: "popular",
        refresh_interval_hours: 12,
        settings_key: "most_popular",
        sort_field: SortField::Popularity,
    },
    Ranking {
        mode: OrderingMode::TopRated,
        path: "top_rated",
        refresh_interval_hours: 24,
        settings_key: "top_rated",
        sort_field: SortField::VoteAverage,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_table() {
        let popular = OrderingMode::MostPopular.ranking().unwrap();
        assert_eq!(popular.path, "popular");
        assert_eq!(popular.refresh_interval(), Duration::hours(12));
        assert_eq!(popular.sort_field, SortField::Popularity);

        let top = OrderingMode::TopRated.ranking().unwrap();
        assert_eq!(top.path, "top_rated");
        assert_eq!(top.refresh_interval(), Duration::hours(24));
        assert_eq!(top.sort_field.column(), "vote_average");
    }

    #[test]
    fn test_favorite_has_no_ranking() {
        assert!(OrderingMode::Favorite.ranking().is_none());
    }

    #[test]
    fn test_settings_keys_are_unique() {
        assert_ne!(RANKINGS[0].settings_key, RANKINGS[1].settings_key);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("popular".parse::<OrderingMode>().unwrap(), OrderingMode::MostPopular);
        assert_eq!("Top-Rated".parse::<OrderingMode>().unwrap(), OrderingMode::TopRated);
        assert_eq!("favorites".parse::<OrderingMode>().unwrap(), OrderingMode::Favorite);
        assert!("newest".parse::<OrderingMode>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for mode in OrderingMode::ALL {
            assert_eq!(mode.to_string().parse::<OrderingMode>().unwrap(), mode);
        }
    }
}
