//! Sentiment analysis through the Watson natural-language-understanding API.
//!
//! Every call exchanges the API key for a fresh IAM token and then requests
//! document-level sentiment. Failures of any kind collapse to `None`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::NluConfig;

const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

#[derive(Debug, Error)]
pub enum NluError {
    #[error("NLU is not configured: missing {0}")]
    NotConfigured(&'static str),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{stage} returned {status}: {message}")]
    Api {
        stage: &'static str,
        status: u16,
        message: String,
    },
}

/// Anything that can label a piece of text with a coarse sentiment.
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Returns the label for `text`, or `None` when no label could be obtained.
    async fn analyze(&self, text: &str) -> Option<String>;
}

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    sentiment: SentimentResult,
}

#[derive(Debug, Deserialize)]
struct SentimentResult {
    document: DocumentSentiment,
}

#[derive(Debug, Deserialize)]
struct DocumentSentiment {
    label: String,
}

#[derive(Clone)]
pub struct NluClient {
    client: Client,
    config: NluConfig,
}

impl NluClient {
    #[must_use]
    pub const fn new(client: Client, config: NluConfig) -> Self {
        Self { client, config }
    }

    async fn request_token(&self, api_key: &str) -> Result<String, NluError> {
        let response = self
            .client
            .post(&self.config.iam_url)
            .form(&[("grant_type", IAM_GRANT_TYPE), ("apikey", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NluError::Api {
                stage: "IAM token exchange",
                status: status.as_u16(),
                message,
            });
        }

        let token: IamTokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// Runs a single analysis, surfacing the failure reason.
    ///
    /// # Errors
    /// Fails when configuration is missing, either HTTP exchange fails, or the
    /// response lacks `sentiment.document.label`.
    pub async fn try_analyze(&self, text: &str) -> Result<String, NluError> {
        let url = self
            .config
            .url
            .as_deref()
            .ok_or(NluError::NotConfigured("url"))?;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(NluError::NotConfigured("api_key"))?;

        let token = self.request_token(api_key).await?;

        let endpoint = format!("{}/v1/analyze", url.trim_end_matches('/'));
        let response = self
            .client
            .post(&endpoint)
            .query(&[("version", self.config.version.as_str())])
            .bearer_auth(token)
            .json(&json!({
                "text": text,
                "features": { "sentiment": {} }
            }))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let message = response.text().await.unwrap_or_default();
            return Err(NluError::Api {
                stage: "analyze",
                status: status.as_u16(),
                message,
            });
        }

        let result: AnalyzeResponse = response.json().await?;
        debug!(label = %result.sentiment.document.label, "Sentiment analyzed");
        Ok(result.sentiment.document.label)
    }
}

#[async_trait]
impl SentimentAnalyzer for NluClient {
    async fn analyze(&self, text: &str) -> Option<String> {
        match self.try_analyze(text).await {
            Ok(label) => Some(label),
            Err(e) => {
                warn!(error = %e, "Sentiment analysis failed");
                None
            }
        }
    }
}
