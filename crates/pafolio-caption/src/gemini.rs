//! Gemini-backed caption generation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use crate::captioner::{Captioner, CAPTION_KEY_MISSING, CAPTION_UNAVAILABLE};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-2.5-flash";

/// Caption generator backed by the Generative Language API.
pub struct GeminiCaptioner {
    http_client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl Debug for GeminiCaptioner {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        // Never expose the API key.
        f.debug_struct("GeminiCaptioner")
            .field("configured", &self.api_key.is_some())
            .finish()
    }
}

// generateContent request/response structures
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiCaptioner {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_base_url(api_key, API_BASE.to_string())
    }

    /// Constructor with an explicit base URL, for tests against a stub
    /// server.
    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client for caption generation")?;

        Ok(GeminiCaptioner {
            http_client,
            api_key,
            base_url,
        })
    }

    fn build_prompt(indicator_title: &str, file_name_hint: &str, existing_notes: &str) -> String {
        format!(
            "You are an assistant for a teacher's performance-agreement (PA) report.\n\
             Write a short, formal caption for one piece of evidence.\n\
             \n\
             Context:\n\
             - Indicator: {indicator_title}\n\
             - File name: {file_name_hint}\n\
             - Teacher's notes: {existing_notes}\n\
             \n\
             Requirements:\n\
             - 1-2 sentences\n\
             - Formal register\n\
             - Emphasize learner outcomes or teaching improvement"
        )
    }

    async fn generate(&self, api_key: &str, prompt: String) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http_client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, MODEL
            ))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .context("Failed to reach caption endpoint")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Caption endpoint returned status {}", status);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse caption response")?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .filter(|t| !t.is_empty())
            .context("Caption response carried no text")?;

        Ok(text)
    }
}

#[async_trait]
impl Captioner for GeminiCaptioner {
    async fn suggest(
        &self,
        indicator_title: &str,
        file_name_hint: &str,
        existing_notes: &str,
    ) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("Caption requested without a configured API key");
            return CAPTION_KEY_MISSING.to_string();
        };

        let prompt = Self::build_prompt(indicator_title, file_name_hint, existing_notes);
        match self.generate(api_key, prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Caption generation failed");
                CAPTION_UNAVAILABLE.to_string()
            }
        }
    }
}
