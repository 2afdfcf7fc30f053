use reqwest::Client;
use sqlx::SqlitePool;
use std::sync::Arc;
use tmdb::{ApiKey, TmdbClient};

use crate::config::Config;
use crate::db;
use crate::error::AppResult;
use crate::services::{
    create_sync_actor, CatalogService, DetailAugmentor, PaginationController, SettingsService,
    SyncHandle, TmdbSource,
};

/// Fully wired catalog: storage, remote source and the sync worker.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub api_key: ApiKey,
    pub tmdb: Arc<TmdbClient>,
    pub catalog: Arc<CatalogService>,
    pub settings: Arc<SettingsService>,
    pub pagination: Arc<PaginationController>,
    pub detail: Arc<DetailAugmentor>,
    pub sync: SyncHandle,
}

impl AppState {
    /// Open the data directory and start the sync worker.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn new(config: Config) -> AppResult<Self> {
        tokio::fs::create_dir_all(&config.data_dir).await?;

        let db = db::create_pool(&config.database_url(), config.max_connections).await?;
        let settings = Arc::new(SettingsService::open(config.settings_path()).await?);

        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;
        let api_key: ApiKey = Arc::new(parking_lot::RwLock::new(config.tmdb_api_key.clone()));
        let mut tmdb = TmdbClient::new(http_client, Arc::clone(&api_key));
        if let Some(language) = &config.language {
            tmdb = tmdb.with_language(language.clone());
        }
        let tmdb = Arc::new(tmdb);
        let source = Arc::new(TmdbSource::new(Arc::clone(&tmdb)));

        let catalog = Arc::new(CatalogService::new(db.clone()));

        let pagination = Arc::new(PaginationController::new(
            settings.clone(),
            catalog.clone(),
            source.clone(),
        ));
        let detail = Arc::new(DetailAugmentor::new(source, catalog.clone()));
        let sync = create_sync_actor(
            Arc::clone(&pagination),
            settings.clone(),
            Arc::clone(&detail),
        );

        tracing::debug!("Catalog ready in {}", config.data_dir.display());

        Ok(Self {
            db,
            config: Arc::new(config),
            api_key,
            tmdb,
            catalog,
            settings,
            pagination,
            detail,
            sync,
        })
    }
}
