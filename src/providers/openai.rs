use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Default public API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Value used when no API key is configured; requests are never sent with it
pub const PLACEHOLDER_API_KEY: &str = "your-openai-api-key-here";

/// OpenAI client for interacting with the chat-completion API
#[derive(Debug, Clone)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key sent as bearer credential
    api_key: String,
    /// API base URL (optional, defaults to public API)
    endpoint: String,
}

/// Chat-completion request
#[derive(Debug, Clone, Serialize, Default)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<OpenAIMessage>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Chat message format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenAIMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Chat-completion response
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIResponse {
    /// Completion choices, the first one is used
    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,
}

/// A single completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIChoice {
    /// Message produced by the model
    #[serde(default)]
    pub message: Option<OpenAIResponseMessage>,

    /// Why the model stopped generating
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message inside a completion choice; content may be null
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl OpenAIRequest {
    /// Create a new request for the given model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(OpenAIMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the output token cap
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Model requested
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Messages in the conversation
    pub fn messages(&self) -> &[OpenAIMessage] {
        &self.messages
    }
}

impl OpenAI {
    /// Create a new OpenAI client
    ///
    /// The transport keeps reqwest's defaults; no request timeout is set.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Whether a usable credential is configured
    pub fn has_credential(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    fn api_url(&self, path: &str) -> String {
        let base = if self.endpoint.trim().is_empty() {
            DEFAULT_ENDPOINT
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/{}", base, path)
    }

    fn ensure_credential(&self) -> Result<(), ProviderError> {
        if self.has_credential() {
            Ok(())
        } else {
            Err(ProviderError::AuthenticationError(
                "No OpenAI API key configured".to_string(),
            ))
        }
    }

    /// Send a chat-completion request
    pub async fn complete(&self, request: OpenAIRequest) -> Result<OpenAIResponse, ProviderError> {
        self.ensure_credential()?;

        let api_url = self.api_url("chat/completions");
        debug!("Sending chat completion to {} (model {})", api_url, request.model);

        let response = self.client.post(&api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(map_status_error(status, error_text));
        }

        let body = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read OpenAI API response: {}", e)))?;

        serde_json::from_str::<OpenAIResponse>(&body)
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse OpenAI API response: {}", e)))
    }

    /// Test the connection by listing the available models
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.ensure_credential()?;

        let response = self.client.get(self.api_url("models"))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, error_text));
        }
        Ok(())
    }

    /// Extract the first completion's text from a response
    pub fn extract_text_from_response(response: &OpenAIResponse) -> Option<String> {
        response.choices.first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.clone())
    }
}

fn map_transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_connect() || error.is_timeout() {
        ProviderError::ConnectionError(format!("Failed to reach OpenAI API: {}", error))
    } else {
        ProviderError::RequestFailed(format!("Failed to send request to OpenAI API: {}", error))
    }
}

fn map_status_error(status: StatusCode, message: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED => ProviderError::AuthenticationError(message),
        _ => ProviderError::ApiError {
            status_code: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl Provider for OpenAI {
    type Request = OpenAIRequest;
    type Response = OpenAIResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        OpenAI::complete(self, request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        OpenAI::test_connection(self).await
    }

    fn extract_text(response: &Self::Response) -> Option<String> {
        Self::extract_text_from_response(response)
    }
}
