//! Chat-completions client for scripting and style selection.
//!
//! Talks to an OpenAI-compatible `/v1/chat/completions` endpoint. The base
//! URL is configurable so tests can point it at a mock server.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};

/// Chat-completions API client.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl ChatClient {
    /// Create a client from engine config.
    pub fn new(config: &EngineConfig) -> EngineResult<Self> {
        if config.openai_api_key.is_empty() {
            return Err(EngineError::config("OPENAI_API_KEY not set"));
        }
        Ok(Self {
            client: Client::new(),
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
        })
    }

    /// Send one system+user exchange, returning the raw completion text.
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> EngineResult<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
        };

        debug!("Chat completion request to {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::external(format!("Chat request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::external(format!(
                "Chat API returned {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| EngineError::external(format!("Malformed chat response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| EngineError::external("Chat response had no content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{bearer_token, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> EngineConfig {
        EngineConfig {
            openai_api_key: "test-key".to_string(),
            openai_base_url: base_url,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let err = ChatClient::new(&EngineConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[tokio::test]
    async fn test_complete_extracts_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(bearer_token("test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "calm"}}]
            })))
            .mount(&server)
            .await;

        let client = ChatClient::new(&test_config(server.uri())).unwrap();
        let answer = client.complete("sys", "user", 0.3).await.unwrap();
        assert_eq!(answer, "calm");
    }

    #[tokio::test]
    async fn test_complete_maps_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = ChatClient::new(&test_config(server.uri())).unwrap();
        let err = client.complete("sys", "user", 0.3).await.unwrap_err();
        assert!(matches!(err, EngineError::ExternalService(_)));
    }

    #[tokio::test]
    async fn test_complete_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let client = ChatClient::new(&test_config(server.uri())).unwrap();
        let err = client.complete("sys", "user", 0.3).await.unwrap_err();
        assert!(matches!(err, EngineError::ExternalService(_)));
    }
}
