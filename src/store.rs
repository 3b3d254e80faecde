use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ResultRow;

const TABLE_PATH: &str = "rest/v1/quiz_results";
const LIST_COLUMNS: &str = "id,name,date,subject,correct,incorrect,created_at";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("result store is not configured")]
    Unavailable,
    #[error("result store request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub key: String,
}

impl StoreConfig {
    // Each value resolves independently: in-process override, then
    // environment, then empty. Both must end up non-blank for the store to
    // be configured. Resolved once at startup, immutable afterward.
    pub fn resolve(override_url: Option<String>, override_key: Option<String>) -> Option<Self> {
        let url = override_url
            .or_else(|| std::env::var("LETSLEARN_STORE_URL").ok())
            .unwrap_or_default();
        let key = override_key
            .or_else(|| std::env::var("LETSLEARN_STORE_KEY").ok())
            .unwrap_or_default();

        if url.trim().is_empty() || key.trim().is_empty() {
            return None;
        }
        Some(Self { url, key })
    }
}

// Row subset fetched by the upsert lookup.
#[derive(Debug, Deserialize)]
struct ExistingRow {
    id: String,
    correct: i64,
    incorrect: i64,
}

#[derive(Debug, Serialize)]
struct ScoreUpdate {
    correct: i64,
    incorrect: i64,
}

#[derive(Clone)]
pub struct ResultStore {
    client: Client,
    config: Option<StoreConfig>,
}

impl ResultStore {
    pub fn new(config: Option<StoreConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    fn table_url(config: &StoreConfig) -> String {
        format!("{}/{}", config.url.trim_end_matches('/'), TABLE_PATH)
    }

    // All stored rows, most recently created first.
    pub fn list(&self) -> Result<Vec<ResultRow>, StoreError> {
        let config = self.config.as_ref().ok_or(StoreError::Unavailable)?;

        let response = self
            .client
            .get(Self::table_url(config))
            .header("apikey", &config.key)
            .bearer_auth(&config.key)
            .query(&[("select", LIST_COLUMNS), ("order", "created_at.desc")])
            .send()?;

        if !response.status().is_success() {
            return Err(StoreError::HttpStatus(response.status()));
        }

        Ok(response.json()?)
    }

    // Insert-or-accumulate keyed by (name, subject, date): an existing row
    // has the new counts added to its stored values, other fields untouched.
    // An empty lookup is the insert path, not an error. The lookup-then-write
    // sequence is not atomic against concurrent sessions.
    pub fn upsert(&self, row: &ResultRow) -> Result<(), StoreError> {
        let config = self.config.as_ref().ok_or(StoreError::Unavailable)?;
        let url = Self::table_url(config);

        let response = self
            .client
            .get(&url)
            .header("apikey", &config.key)
            .bearer_auth(&config.key)
            .query(&[
                ("select", "id,correct,incorrect".to_string()),
                ("name", format!("eq.{}", row.name)),
                ("subject", format!("eq.{}", row.subject.as_str())),
                ("date", format!("eq.{}", row.date)),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(StoreError::HttpStatus(response.status()));
        }

        let existing: Vec<ExistingRow> = response.json()?;

        let response = if let Some(existing) = existing.first() {
            self.client
                .patch(&url)
                .header("apikey", &config.key)
                .bearer_auth(&config.key)
                .header("Prefer", "return=minimal")
                .query(&[("id", format!("eq.{}", existing.id))])
                .json(&ScoreUpdate {
                    correct: existing.correct + row.correct,
                    incorrect: existing.incorrect + row.incorrect,
                })
                .send()?
        } else {
            self.client
                .post(&url)
                .header("apikey", &config.key)
                .bearer_auth(&config.key)
                .header("Prefer", "return=minimal")
                .json(&[row])
                .send()?
        };

        if !response.status().is_success() {
            return Err(StoreError::HttpStatus(response.status()));
        }

        Ok(())
    }
}
