use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use tango_core::store::WordStore;
use tango_types::{NewVocabularyItem, VocabularyItem};

use crate::row::{InsertRow, ProgressPatch, WordRow};

/// Supabase table accessed straight through its PostgREST endpoint
#[derive(Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    table: String,
    client: reqwest::Client,
}

impl SupabaseClient {
    pub fn new(base_url: String, anon_key: String, table: String) -> Self {
        Self {
            base_url,
            anon_key,
            table,
            client: reqwest::Client::new(),
        }
    }

    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), self.table)
    }

    /// All words, newest first
    pub async fn list_words(&self) -> Result<Vec<VocabularyItem>> {
        let rows: Vec<WordRow> = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .context("Failed to send request to Supabase")?
            .error_for_status()
            .context("Supabase rejected word list request")?
            .json()
            .await
            .context("Failed to parse word rows")?;

        Ok(rows.into_iter().map(VocabularyItem::from).collect())
    }

    /// Insert one word and read back the stored row
    pub async fn insert_word(&self, item: &NewVocabularyItem) -> Result<VocabularyItem> {
        let rows: Vec<WordRow> = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&[InsertRow::from(item)])
            .send()
            .await
            .context("Failed to send request to Supabase")?
            .error_for_status()
            .context("Supabase rejected insert")?
            .json()
            .await
            .context("Failed to parse inserted row")?;

        rows.into_iter()
            .next()
            .map(VocabularyItem::from)
            .context("Supabase returned no row for insert")
    }

    /// Write progress and stamp `last_practiced` with the current time
    pub async fn set_progress(&self, id: &str, progress: u8) -> Result<()> {
        let patch = ProgressPatch {
            progress,
            last_practiced: Utc::now(),
        };

        self.request(Method::PATCH)
            .query(&[("id", format!("eq.{id}"))])
            .json(&patch)
            .send()
            .await
            .context("Failed to send request to Supabase")?
            .error_for_status()
            .context("Supabase rejected progress update")?;

        Ok(())
    }

    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.table_url())
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }
}

#[async_trait]
impl WordStore for SupabaseClient {
    async fn fetch_all(&self) -> Vec<VocabularyItem> {
        match self.list_words().await {
            Ok(words) => {
                tracing::info!("Fetched {} words", words.len());
                words
            }
            Err(e) => {
                tracing::error!("Error fetching words: {:#}", e);
                Vec::new()
            }
        }
    }

    async fn insert_one(&self, item: NewVocabularyItem) -> Option<VocabularyItem> {
        self.insert_word(&item)
            .await
            .inspect_err(|e| tracing::error!("Error adding word: {:#}", e))
            .ok()
    }

    async fn update_progress(&self, id: &str, progress: u8) -> bool {
        match self.set_progress(id, progress).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error updating progress for {}: {:#}", id, e);
                false
            }
        }
    }
}
