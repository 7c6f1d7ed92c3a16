use async_trait::async_trait;
use finsummary_common::{FinSummaryError, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::types::{
    ChatMessage, ChatRequest, ChatResponse, GenerateOptions, GenerateRequest, GenerateResponse,
};

const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Ollama API client
///
/// One HTTP request per call. Failures, including timeouts, are returned
/// as-is; retrying is left to the caller.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    options: Option<GenerateOptions>,
    client: Client,
}

impl OllamaClient {
    /// Create new Ollama client with the default 5 minute timeout
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, model, DEFAULT_TIMEOUT_SECS)
    }

    /// Create new Ollama client with a custom request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("Ollama client initialized: {} (model: {})", base_url, model);
        Ok(Self {
            base_url,
            model,
            options: None,
            client,
        })
    }

    /// Attach sampling options sent with every request
    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Test connection to Ollama
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            FinSummaryError::network(format!("Failed to connect to Ollama at {}: {}", url, e))
        })?;
        Ok(response.status().is_success())
    }

    async fn post<T: serde::Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| FinSummaryError::network(format!("Failed to send request to {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FinSummaryError::llm(format!(
                "Ollama API error ({}): {}",
                status, body
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: Some(false),
            options: self.options.clone(),
        };

        debug!(
            "Sending generate request to Ollama - Model: {}, Prompt length: {}",
            request.model,
            request.prompt.len()
        );

        let result: GenerateResponse = self
            .post("/api/generate", &request)
            .await?
            .json()
            .await
            .map_err(|e| FinSummaryError::llm(format!("Failed to parse response: {}", e)))?;

        if result.response.is_empty() {
            return Err(FinSummaryError::llm("Empty response from Ollama"));
        }

        debug!("Received response from Ollama - Length: {}", result.response.len());
        Ok(result.response)
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatMessage> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            stream: Some(false),
            options: self.options.clone(),
        };

        debug!(
            "Sending chat request to Ollama - Model: {}, Messages: {}",
            request.model,
            request.messages.len()
        );

        let result: ChatResponse = self
            .post("/api/chat", &request)
            .await?
            .json()
            .await
            .map_err(|e| FinSummaryError::llm(format!("Failed to parse chat response: {}", e)))?;

        if result.message.content.is_empty() {
            return Err(FinSummaryError::llm("Empty chat response from Ollama"));
        }

        Ok(result.message)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, Method::POST, MockServer};
    use serde_json::json;

    #[test]
    fn test_client_creation_trims_trailing_slash() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3.2").unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
        assert_eq!(client.model_name(), "llama3.2");
    }

    #[tokio::test]
    async fn test_generate_returns_response_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/generate")
                    .json_body_partial(r#"{"model": "llama3.2", "stream": false}"#);
                then.status(200).json_body(json!({
                    "model": "llama3.2",
                    "response": "GDP grew 2%.",
                    "done": true
                }));
            })
            .await;

        let client = OllamaClient::new(server.base_url(), "llama3.2").unwrap();
        let text = client.generate("Summarize").await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "GDP grew 2%.");
    }

    #[tokio::test]
    async fn test_generate_error_status_is_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(500).body("boom");
            })
            .await;

        let client = OllamaClient::new(server.base_url(), "llama3.2").unwrap();
        let err = client.generate("Summarize").await.unwrap_err();

        mock.assert_hits_async(1).await;
        assert!(matches!(err, FinSummaryError::Llm(ref msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_generate_empty_response_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200).json_body(json!({ "response": "", "done": true }));
            })
            .await;

        let client = OllamaClient::new(server.base_url(), "llama3.2").unwrap();
        let err = client.generate("Summarize").await.unwrap_err();
        assert!(matches!(err, FinSummaryError::Llm(_)));
    }

    #[tokio::test]
    async fn test_chat_returns_message() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/chat")
                    .json_body_partial(r#"{"model": "llama3.2", "stream": false}"#)
                    .body_contains("hello");
                then.status(200).json_body(json!({
                    "model": "llama3.2",
                    "message": { "role": "assistant", "content": "สวัสดี" },
                    "done": true
                }));
            })
            .await;

        let client = OllamaClient::new(server.base_url(), "llama3.2").unwrap();
        let reply = client.chat(&[ChatMessage::user("hello")]).await.unwrap();

        mock.assert_async().await;
        assert_eq!(reply.content, "สวัสดี");
    }

    #[tokio::test]
    async fn test_connection_check() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tags");
                then.status(200).json_body(json!({ "models": [] }));
            })
            .await;

        let client = OllamaClient::new(server.base_url(), "llama3.2").unwrap();
        assert!(client.test_connection().await.unwrap());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = OllamaClient::with_timeout("http://127.0.0.1:9", "llama3.2", 2).unwrap();
        let err = client.generate("Summarize").await.unwrap_err();
        assert!(matches!(err, FinSummaryError::Network(_)));
    }
}
