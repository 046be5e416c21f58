//! A `LanguageModel` backed by the Gemini generative language API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use askdata_configuration::Configuration;
use query_engine_translation::translation::model::{LanguageModel, ModelError};

pub struct GeminiModel {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl GeminiModel {
    pub fn new(configuration: &Configuration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(GeminiModel {
            client,
            url: generate_content_url(
                &configuration.model_endpoint.0,
                &configuration.model_name.0,
            ),
            api_key: configuration.api_key.clone(),
        })
    }
}

fn generate_content_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model.trim_start_matches('/')
    )
}

#[async_trait]
impl LanguageModel for GeminiModel {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let response = self
            .client
            .post(&self.url)
            .query(&[("key", &self.api_key)])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|err| ModelError::Other(err.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                body: error_body(response.text().await),
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ModelError::Other(err.into()))?;

        body.completion().ok_or(ModelError::EmptyCompletion)
    }
}

/// The body of an error response, or why it could not be read.
fn error_body<E: std::fmt::Display>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|err| {
        tracing::warn!("Unable to read the body of a failed model response: {}", err);
        format!("<unreadable response body: {err}>")
    })
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    fn from_prompt(prompt: &str) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// The text of the first candidate's parts, joined.
    fn completion(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|part| part.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}
