pub mod schema;

use tango_types::{WordDetails, WordSuggestion};

/// Word enrichment provider interface
#[async_trait::async_trait]
pub trait Enricher: Send + Sync {
    /// Phonetic form, romanization and translation for a primary-script word
    async fn enrich(&self, word: &str) -> Result<WordDetails, EnrichError>;

    /// Up to `count` words for `category`, related to `seed` when given
    async fn suggest(
        &self,
        seed: Option<&str>,
        category: &str,
        count: usize,
    ) -> Result<Vec<WordSuggestion>, EnrichError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}
