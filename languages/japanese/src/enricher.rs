use async_trait::async_trait;
use serde_json::{Value, json};
use tango_enrich::schema::{parse_details, parse_suggestions};
use tango_enrich::{EnrichError, Enricher, ProviderMetadata};
use tango_types::{WordDetails, WordSuggestion};

use crate::prompt::{details_prompt, details_schema, suggestions_prompt, suggestions_schema};

/// Japanese word enrichment backed by Gemini structured output
#[derive(Clone)]
pub struct GeminiEnricher {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiEnricher {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Run one prompt and return the model's raw JSON text
    async fn generate(&self, prompt: String, schema: Value) -> Result<String, EnrichError> {
        if self.api_key.is_empty() {
            return Err(EnrichError::AuthenticationError);
        }

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema
            }
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(EnrichError::RateLimitExceeded);
        }

        if response.status() == 401 || response.status() == 403 {
            return Err(EnrichError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(EnrichError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: Value = response.json().await.map_err(|e| {
            EnrichError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        response_text(&json)
    }
}

/// Pull the generated text out of a `generateContent` response
fn response_text(json: &Value) -> Result<String, EnrichError> {
    json["candidates"]
        .get(0)
        .and_then(|c| c["content"]["parts"].get(0))
        .and_then(|p| p["text"].as_str())
        .map(str::to_string)
        .ok_or_else(|| EnrichError::InvalidResponse("No text in response".to_string()))
}

#[async_trait]
impl Enricher for GeminiEnricher {
    async fn enrich(&self, word: &str) -> Result<WordDetails, EnrichError> {
        let text = self.generate(details_prompt(word), details_schema()).await?;
        tracing::debug!("Enrichment for '{}': {}", word, text);

        parse_details(&text)
    }

    async fn suggest(
        &self,
        seed: Option<&str>,
        category: &str,
        count: usize,
    ) -> Result<Vec<WordSuggestion>, EnrichError> {
        let prompt = suggestions_prompt(seed, category, count);
        let text = self.generate(prompt, suggestions_schema()).await?;

        let mut suggestions = parse_suggestions(&text)?;
        suggestions.truncate(count);
        Ok(suggestions)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}
