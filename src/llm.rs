//! Keyword refinement through a remote chat-completion endpoint.
//!
//! One POST per refinement: the full script plus the current keyword list go
//! out, 8-10 comma-separated search terms come back. Any failure leaves the
//! caller's keyword set untouched; there is no retry here.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::LanguageModel;
use crate::types::ClipError;

const COMPLETIONS_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";

const SYSTEM_PROMPT: &str = "You suggest stock-footage search keywords for short-form video \
     scripts. Reply with 8-10 comma-separated search terms and nothing else.";

/// Low temperature keeps suggestions close to the script.
const TEMPERATURE: f32 = 0.2;

pub struct RefinementClient {
    client: Client,
}

impl RefinementClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!("clipscout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Ask the model for a replacement keyword set.
    ///
    /// Fails fast without a request when no keywords exist yet or the
    /// credential is missing.
    pub async fn refine(
        &self,
        api_key: &str,
        model: LanguageModel,
        script: &str,
        keywords: &[String],
    ) -> Result<Vec<String>, ClipError> {
        if keywords.is_empty() {
            return Err(ClipError::EmptyKeywords);
        }
        if api_key.trim().is_empty() {
            return Err(ClipError::MissingCredential { provider: "google" });
        }

        let body = ChatRequest {
            model: model.as_str(),
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!(
                        "Script:\n{script}\n\nCurrent keywords: {}",
                        keywords.join(", ")
                    ),
                },
            ],
        };

        let response = self
            .client
            .post(COMPLETIONS_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClipError::Api {
                provider: "google",
                status: status.as_u16(),
            });
        }

        let data: ChatResponse = response.json().await.map_err(|e| ClipError::Malformed {
            provider: "google",
            reason: e.to_string(),
        })?;
        let content = data
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ClipError::Malformed {
                provider: "google",
                reason: "no choices in response".to_string(),
            })?;

        let terms = parse_terms(&content);
        if terms.is_empty() {
            return Err(ClipError::Malformed {
                provider: "google",
                reason: "no keywords in response".to_string(),
            });
        }
        debug!(count = terms.len(), "keyword refinement succeeded");
        Ok(terms)
    }
}

impl Default for RefinementClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a completion into trimmed, lowercased, deduplicated terms in
/// response order.
pub(crate) fn parse_terms(content: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for raw in content.split(',') {
        let term = raw.trim().to_lowercase();
        if term.is_empty() || terms.contains(&term) {
            continue;
        }
        terms.push(term);
    }
    terms
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_keywords_fail_before_any_request() {
        let client = RefinementClient::new();
        let err = client
            .refine("some-key", LanguageModel::Gemini15Pro, "a script", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ClipError::EmptyKeywords));
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_request() {
        let client = RefinementClient::new();
        let err = client
            .refine(
                "  ",
                LanguageModel::Gemini15Pro,
                "a script",
                &["nature".to_string()],
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClipError::MissingCredential { provider: "google" }
        ));
    }

    #[test]
    fn terms_are_trimmed_lowercased_and_deduplicated() {
        let terms = parse_terms("Ocean Waves,  sunset , OCEAN WAVES, , city lights\n");
        assert_eq!(terms, vec!["ocean waves", "sunset", "city lights"]);
    }

    #[test]
    fn all_empty_terms_parse_to_nothing() {
        assert!(parse_terms(" , ,,  ").is_empty());
        assert!(parse_terms("").is_empty());
    }

    #[test]
    fn response_shape_takes_the_first_choice() {
        let json = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "drone shot, skyline" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        let content = response.choices.into_iter().next().unwrap().message.content;
        assert_eq!(parse_terms(&content), vec!["drone shot", "skyline"]);
    }
}
