use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::Config,
    error::AppResult,
    services::{
        providers::DeepFaceProvider, EmotionClassifier, GenreQueries, ListingScraper, Recommender,
        DEFAULT_LIMIT,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl AppState {
    /// Wraps an already-built recommender with the default limits
    pub fn new(recommender: Recommender) -> Self {
        Self {
            recommender: Arc::new(recommender),
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_LIMIT * 5,
        }
    }

    /// Builds the DeepFace-backed recommender described by `config`
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);

        let provider = DeepFaceProvider::new(config.analyzer_url.clone(), timeout)?;
        let scraper = ListingScraper::new(timeout)?;
        let queries = GenreQueries::new(&config.listings_url);

        tracing::info!(
            analyzer_url = %config.analyzer_url,
            listings_url = %config.listings_url,
            timeout_secs = config.http_timeout_secs,
            "Built recommendation pipeline"
        );

        let recommender = Recommender::new(
            EmotionClassifier::new(Arc::new(provider)),
            Arc::new(queries),
            Arc::new(scraper),
        );

        Ok(Self {
            recommender: Arc::new(recommender),
            default_limit: config.default_limit,
            max_limit: config.max_limit,
        })
    }

    /// Resolves the caller's limit against the configured default and cap
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}
