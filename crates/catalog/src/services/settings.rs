use async_trait::async_trait;
use domain::{DomainError, DomainResult, OrderingMode, PageState, Ranking, SettingsStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not encode settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl From<SettingsError> for DomainError {
    fn from(e: SettingsError) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

/// Everything persisted between runs besides the catalog itself.
///
/// ```toml
/// active_mode = "top_rated"
///
/// [pages.most_popular]
/// current_page = 3
/// total_pages = 500
/// last_refreshed_at = "2024-03-01T08:00:00Z"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub active_mode: OrderingMode,
    /// Paging state keyed by `Ranking::settings_key`.
    #[serde(default)]
    pub pages: BTreeMap<String, PageState>,
}

impl Settings {
    pub fn page_state(&self, ranking: &Ranking) -> PageState {
        self.pages
            .get(ranking.settings_key)
            .copied()
            .unwrap_or_default()
    }

    /// Read a settings file. A missing file is a first run.
    async fn read_from(path: &Path) -> Result<Self, SettingsError> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No settings at {}, starting fresh", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings: Self = toml::from_str(&text)?;
        tracing::debug!(
            "Read settings from {} (active mode {}, {} rankings tracked)",
            path.display(),
            settings.active_mode,
            settings.pages.len()
        );
        Ok(settings)
    }

    /// Replace the file at `path` in one rename; readers never see a
    /// partial file.
    async fn write_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }

        let staged = path.with_extension("toml.tmp");
        tokio::fs::write(&staged, toml::to_string_pretty(self)?).await?;
        tokio::fs::rename(&staged, path).await?;
        Ok(())
    }
}

/// TOML-backed [`SettingsStore`] with an in-memory copy.
///
/// The file is only written when a value actually changes, so a run that
/// never switches modes or loads a page leaves the disk alone.
pub struct SettingsService {
    path: PathBuf,
    current: RwLock<Settings>,
}

impl SettingsService {
    pub async fn open(path: PathBuf) -> Result<Self, SettingsError> {
        let current = RwLock::new(Settings::read_from(&path).await?);
        Ok(Self { path, current })
    }

    pub async fn snapshot(&self) -> Settings {
        self.current.read().await.clone()
    }

    /// Apply `change` and persist it before anyone can read it.
    ///
    /// The write lock is held across the file write so updates to different
    /// rankings never overwrite each other.
    async fn modify<F>(&self, change: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut Settings),
    {
        let mut current = self.current.write().await;

        let mut updated = current.clone();
        change(&mut updated);
        if updated == *current {
            return Ok(());
        }

        updated.write_to(&self.path).await?;
        *current = updated;
        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for SettingsService {
    async fn active_mode(&self) -> OrderingMode {
        self.current.read().await.active_mode
    }

    async fn set_active_mode(&self, mode: OrderingMode) -> DomainResult<()> {
        self.modify(|s| s.active_mode = mode).await?;
        tracing::debug!("Active mode set to {}", mode);
        Ok(())
    }

    async fn page_state(&self, ranking: &Ranking) -> PageState {
        self.current.read().await.page_state(ranking)
    }

    async fn set_page_state(&self, ranking: &Ranking, state: PageState) -> DomainResult<()> {
        self.modify(|s| {
            s.pages.insert(ranking.settings_key.to_string(), state);
        })
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domain::RANKINGS;

    #[tokio::test]
    async fn test_first_run_defaults_and_lazy_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let service = SettingsService::open(path.clone()).await.unwrap();
        assert_eq!(service.active_mode().await, OrderingMode::MostPopular);
        for ranking in &RANKINGS {
            assert_eq!(service.page_state(ranking).await, PageState::default());
        }

        // Writing the value already in effect touches nothing
        service.set_active_mode(OrderingMode::MostPopular).await.unwrap();
        assert!(!path.exists());

        service.set_active_mode(OrderingMode::TopRated).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let popular = OrderingMode::MostPopular.ranking().unwrap();
        let top_rated = OrderingMode::TopRated.ranking().unwrap();
        let refreshed = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();

        let state = PageState {
            current_page: 3,
            total_pages: 500,
            last_refreshed_at: Some(refreshed),
        };

        {
            let service = SettingsService::open(path.clone()).await.unwrap();
            service.set_active_mode(OrderingMode::TopRated).await.unwrap();
            service.set_page_state(popular, state).await.unwrap();
        }

        let reopened = SettingsService::open(path.clone()).await.unwrap();
        assert_eq!(reopened.active_mode().await, OrderingMode::TopRated);
        assert_eq!(reopened.page_state(popular).await, state);
        assert_eq!(reopened.page_state(top_rated).await, PageState::default());
        assert!(!dir.path().join("settings.toml.tmp").exists());
    }

    #[tokio::test]
    async fn test_rankings_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::open(dir.path().join("settings.toml"))
            .await
            .unwrap();
        let popular = OrderingMode::MostPopular.ranking().unwrap();
        let top_rated = OrderingMode::TopRated.ranking().unwrap();

        let a = PageState {
            current_page: 1,
            total_pages: 10,
            last_refreshed_at: None,
        };
        let b = PageState {
            current_page: 4,
            total_pages: 4,
            last_refreshed_at: None,
        };

        let (ra, rb) = tokio::join!(
            service.set_page_state(popular, a),
            service.set_page_state(top_rated, b)
        );
        ra.unwrap();
        rb.unwrap();

        let settings = service.snapshot().await;
        assert_eq!(settings.page_state(popular), a);
        assert_eq!(settings.page_state(top_rated), b);
    }

    #[tokio::test]
    async fn test_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        tokio::fs::write(&path, "active_mode = \"newest\"").await.unwrap();

        let result = SettingsService::open(path).await;
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_settings_file_format() {
        let mut settings = Settings {
            active_mode: OrderingMode::Favorite,
            ..Default::default()
        };
        settings.pages.insert(
            "top_rated".to_string(),
            PageState {
                current_page: 2,
                total_pages: 7,
                last_refreshed_at: None,
            },
        );

        let text = toml::to_string_pretty(&settings).unwrap();
        assert!(text.contains("active_mode = \"favorite\""));
        assert!(text.contains("[pages.top_rated]"));

        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
