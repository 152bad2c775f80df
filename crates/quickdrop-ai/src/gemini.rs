//! Gemini generateContent client.
//!
//! Failures here are the caller's problem only in the narrow sense: the
//! summary and filename operations swallow errors and degrade to placeholder
//! values, because an AI-provider outage must never break an upload.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Description shown when a file has no extractable text.
pub const NO_TEXT_PLACEHOLDER: &str = "No readable text found in this file.";

// Prompt-context caps, in characters
const DESCRIBE_CONTEXT_CHARS: usize = 4000;
const FILENAME_CONTEXT_CHARS: usize = 1000;
const ANSWER_CONTEXT_CHARS: usize = 3000;

#[derive(Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
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
    content: Content,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to create HTTP client for Gemini")?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Call the generateContent endpoint and return the first candidate's
    /// text.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http_client
            .post(format!(
                "{}/models/{}:generateContent",
                API_BASE, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Gemini API request failed: {} - {}",
                status,
                error_text
            ));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(text.trim().to_string())
    }

    /// Summarize a document. Errors degrade to an explanatory description
    /// string rather than failing the upload.
    pub async fn describe(&self, text: &str) -> String {
        if text.is_empty() {
            return NO_TEXT_PLACEHOLDER.to_string();
        }

        match self.generate(&describe_prompt(text)).await {
            Ok(summary) if !summary.is_empty() => summary,
            Ok(_) => NO_TEXT_PLACEHOLDER.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Description generation failed");
                format!("Could not generate description: {e:#}")
            }
        }
    }

    /// Suggest a better filename from the document's content. None when the
    /// document has no text or the call fails.
    pub async fn suggest_filename(&self, text: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }

        match self.generate(&filename_prompt(text)).await {
            Ok(suggestion) if !suggestion.is_empty() => Some(suggestion),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Filename suggestion failed");
                None
            }
        }
    }

    /// Answer a question about the given document text.
    pub async fn answer(&self, context_text: &str, question: &str) -> Result<String> {
        self.generate(&answer_prompt(context_text, question)).await
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // never expose the api key
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .finish()
    }
}

/// Truncate to at most `max` characters, on a char boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn describe_prompt(text: &str) -> String {
    format!(
        "Summarize this document in 3-5 sentences:\n\n{}",
        truncate_chars(text, DESCRIBE_CONTEXT_CHARS)
    )
}

fn filename_prompt(text: &str) -> String {
    format!(
        "Based on the following content, suggest a short and descriptive filename:\n\n{}",
        truncate_chars(text, FILENAME_CONTEXT_CHARS)
    )
}

fn answer_prompt(context_text: &str, question: &str) -> String {
    format!(
        "You are an assistant helping users understand their uploaded document. \
         Here's the file content:\n\n{}\n\nQuestion: {}",
        truncate_chars(context_text, ANSWER_CONTEXT_CHARS),
        question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        // four 3-byte chars
        let text = "中中中中";
        assert_eq!(truncate_chars(text, 2), "中中");
    }

    #[test]
    fn test_describe_prompt_caps_context() {
        let long = "a".repeat(10_000);
        let prompt = describe_prompt(&long);
        assert!(prompt.len() < DESCRIBE_CONTEXT_CHARS + 100);
        assert!(prompt.starts_with("Summarize this document"));
    }

    #[test]
    fn test_answer_prompt_caps_context_keeps_question() {
        let long = "b".repeat(10_000);
        let prompt = answer_prompt(&long, "what is this?");
        assert!(prompt.len() < ANSWER_CONTEXT_CHARS + 200);
        assert!(prompt.ends_with("Question: what is this?"));
    }

    #[test]
    fn test_filename_prompt_caps_context() {
        let long = "c".repeat(5_000);
        let prompt = filename_prompt(&long);
        assert!(prompt.len() < FILENAME_CONTEXT_CHARS + 100);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = GeminiClient::new("super-secret", DEFAULT_MODEL).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
    }
}
