/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock chat-completion provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with a fixed completion
 * - `MockProvider::failing()` - Always fails with an API error
 * - `MockProvider::empty()` - Succeeds without any completion text
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::providers::openai::{OpenAI, OpenAIChoice, OpenAIRequest, OpenAIResponse, OpenAIResponseMessage};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a completion
    Working,
    /// Always fails with the given HTTP status
    Failing { status_code: u16 },
    /// Fails as if the network were down
    Offline,
    /// Rejects the credential
    Unauthorized,
    /// Succeeds with no choices in the response
    Empty,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Requests received, shared between clones
    requests: Arc<Mutex<Vec<OpenAIRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&OpenAIRequest) -> String>,
}

impl MockProvider {
    /// Text returned by a working provider without a custom generator
    pub const DEFAULT_COMPLETION: &'static str = "  [TRANSLATED]  ";

    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always returns HTTP 500
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing { status_code: 500 })
    }

    /// Create a mock that behaves as if the network were unavailable
    pub fn offline() -> Self {
        Self::new(MockBehavior::Offline)
    }

    /// Create a mock that returns responses without completion text
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&OpenAIRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copy of every request received so far
    pub fn requests(&self) -> Vec<OpenAIRequest> {
        self.requests.lock().clone()
    }

    /// Build a response holding a single completion
    pub fn response_with_text(text: impl Into<String>) -> OpenAIResponse {
        OpenAIResponse {
            choices: vec![OpenAIChoice {
                message: Some(OpenAIResponseMessage {
                    role: Some("assistant".to_string()),
                    content: Some(text.into()),
                }),
                finish_reason: Some("stop".to_string()),
            }],
        }
    }

    fn succeed(&self, request: &OpenAIRequest) -> OpenAIResponse {
        let text = match self.custom_response {
            Some(generator) => generator(request),
            None => Self::DEFAULT_COMPLETION.to_string(),
        };
        Self::response_with_text(text)
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            requests: Arc::clone(&self.requests),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = OpenAIRequest;
    type Response = OpenAIResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        match self.behavior {
            MockBehavior::Working => Ok(self.succeed(&request)),

            MockBehavior::Failing { status_code } => Err(ProviderError::ApiError {
                status_code,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::Offline => Err(ProviderError::ConnectionError(
                "Simulated network failure".to_string(),
            )),

            MockBehavior::Unauthorized => Err(ProviderError::AuthenticationError(
                "Simulated invalid API key".to_string(),
            )),

            MockBehavior::Empty => Ok(OpenAIResponse {
                choices: Vec::new(),
            }),

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(self.succeed(&request))
                }
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Working | MockBehavior::Empty | MockBehavior::Intermittent { .. } => Ok(()),
            MockBehavior::Failing { status_code } => Err(ProviderError::ApiError {
                status_code,
                message: "Simulated provider failure".to_string(),
            }),
            MockBehavior::Offline => Err(ProviderError::ConnectionError("Simulated network failure".to_string())),
            MockBehavior::Unauthorized => Err(ProviderError::AuthenticationError("Simulated invalid API key".to_string())),
        }
    }

    fn extract_text(response: &Self::Response) -> Option<String> {
        OpenAI::extract_text_from_response(response)
    }
}
