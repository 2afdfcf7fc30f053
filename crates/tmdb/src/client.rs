use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::TmdbError;

const BASE_URL: &str = "https://api.themoviedb.org/3";

/// Shared API key that can be updated at runtime.
pub type ApiKey = Arc<RwLock<String>>;

pub struct TmdbClient {
    client: Client,
    api_key: ApiKey,
    pub(crate) lang: Option<String>,
}

impl TmdbClient {
    /// Create a TmdbClient with a reqwest Client.
    ///
    /// Timeouts are configured on the reqwest Client by the caller.
    pub fn new(client: Client, api_key: ApiKey) -> Self {
        Self {
            client,
            api_key,
            lang: None,
        }
    }

    /// Send `language=` with every request.
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Get the current API key
    pub(crate) fn api_key(&self) -> String {
        self.api_key.read().clone()
    }

    /// Get the HTTP client for making requests.
    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", BASE_URL, path)
    }

    /// Common query parameters: the API key plus the optional language.
    pub(crate) fn base_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("api_key", self.api_key())];
        if let Some(lang) = &self.lang {
            query.push(("language", lang.clone()));
        }
        query
    }

    pub(crate) async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        extra: &[(&'static str, String)],
    ) -> crate::Result<T> {
        let url = self.url(path);
        let mut query = self.base_query();
        query.extend(extra.iter().cloned());

        tracing::debug!("GET {}", url);
        let response = self.client().get(&url).query(&query).send().await?;
        self.handle_response(response).await
    }

    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;
        parse_body(status, &body)
    }
}

/// Error body returned by TMDB, e.g. `{"status_code": 7, "status_message": "Invalid API key"}`.
#[derive(Debug, Deserialize)]
struct StatusBody {
    status_code: i64,
    status_message: String,
}

/// Turn a raw HTTP status and body into a typed value.
///
/// TMDB sometimes reports errors through a status body even on a 2xx
/// response, so a body that fails to deserialize is checked for that shape
/// before being reported as a JSON error.
pub fn parse_body<T: serde::de::DeserializeOwned>(status: StatusCode, body: &str) -> crate::Result<T> {
    if !status.is_success() {
        let (tmdb_code, message) = match serde_json::from_str::<StatusBody>(body) {
            Ok(err) => (Some(err.status_code), err.status_message),
            Err(_) => (None, body.to_string()),
        };
        return Err(TmdbError::Api {
            status_code: status.as_u16(),
            tmdb_code,
            message,
        });
    }

    let deserializer = &mut serde_json::Deserializer::from_str(body);
    match serde_path_to_error::deserialize(deserializer) {
        Ok(value) => Ok(value),
        Err(e) => {
            if let Ok(err) = serde_json::from_str::<StatusBody>(body) {
                return Err(TmdbError::Api {
                    status_code: status.as_u16(),
                    tmdb_code: Some(err.status_code),
                    message: err.status_message,
                });
            }
            Err(TmdbError::Json {
                path: e.path().to_string(),
                source: e.into_inner(),
            })
        }
    }
}
