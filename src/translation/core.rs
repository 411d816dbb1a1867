/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct, which builds the
 * prompt for a request, sends it as a single chat completion and turns the
 * answer into a [`TranslationResult`]. Failures never reach the caller of
 * [`TranslationService::translate`]: they are logged and replaced by a
 * placeholder translation.
 */

use log::{debug, error, info};

use crate::app_config::TranslationConfig;
use crate::errors::TranslationError;
use crate::models::{TranslationRequest, TranslationResult};
use crate::providers::Provider;
use crate::providers::openai::{OpenAI, OpenAIRequest, OpenAIResponse};
use super::prompts::build_prompt;

/// Text used when the API answered but returned no completion
pub const EMPTY_COMPLETION_TEXT: &str = "Translation failed";

/// How a translation result was produced
#[derive(Debug)]
pub enum TranslationOutcome {
    /// The model produced the translation
    Translated,
    /// The request failed and the result holds placeholder text
    Fallback(TranslationError),
}

impl TranslationOutcome {
    /// Whether the result holds placeholder text
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// A translation result together with how it was produced
#[derive(Debug)]
pub struct TranslationReport {
    pub result: TranslationResult,
    pub outcome: TranslationOutcome,
}

/// Service translating text through a chat-completion provider
#[derive(Debug, Clone)]
pub struct TranslationService<P = OpenAI> {
    /// Provider receiving the completion requests
    provider: P,
    /// Model identifier sent with every request
    model: String,
    /// Output token cap
    max_tokens: u32,
    /// Sampling temperature
    temperature: f32,
}

impl TranslationService<OpenAI> {
    /// Create a service talking to the OpenAI API described by the config
    pub fn new(config: &TranslationConfig) -> Self {
        let provider = OpenAI::new(config.api_key(), config.endpoint.clone());
        if !provider.has_credential() {
            info!(
                "No API key found in ${}; translations will use placeholder text",
                config.api_key_env
            );
        }
        Self::with_provider(provider, config)
    }
}

impl<P> TranslationService<P>
where
    P: Provider<Request = OpenAIRequest, Response = OpenAIResponse>,
{
    /// Create a service around an existing provider
    pub fn with_provider(provider: P, config: &TranslationConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// The provider used by this service
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Build the chat-completion request for a translation request
    pub fn build_completion_request(&self, request: &TranslationRequest) -> OpenAIRequest {
        let prompt = build_prompt(
            &request.text,
            request.from_language,
            request.to_language,
            request.user_gender,
            request.audience_type,
        );

        OpenAIRequest::new(self.model.clone())
            .add_message("user", prompt)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
    }

    /// Translate, reporting why the request failed instead of falling back
    pub async fn try_translate(&self, request: &TranslationRequest) -> Result<TranslationResult, TranslationError> {
        if request.from_language == request.to_language {
            return Err(TranslationError::SameLanguage(
                request.from_language.display_name().to_string(),
            ));
        }

        debug!(
            "Translating {} chars {} -> {} (audience: {})",
            request.text.chars().count(),
            request.from_language,
            request.to_language,
            request.audience_type
        );

        let completion = self.build_completion_request(request);
        let response = self.provider.complete(completion).await?;

        let translated_text = P::extract_text(&response)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| EMPTY_COMPLETION_TEXT.to_string());

        Ok(result_for(request, translated_text))
    }

    /// Translate and report whether the placeholder was used
    pub async fn translate_with_outcome(&self, request: &TranslationRequest) -> TranslationReport {
        match self.try_translate(request).await {
            Ok(result) => TranslationReport {
                result,
                outcome: TranslationOutcome::Translated,
            },
            Err(e) => {
                error!("Translation error: {}", e);
                TranslationReport {
                    result: Self::fallback_result(request),
                    outcome: TranslationOutcome::Fallback(e),
                }
            }
        }
    }

    /// Translate, substituting placeholder text on any failure
    pub async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        self.translate_with_outcome(request).await.result
    }

    /// Deterministic placeholder result for a failed request
    ///
    /// The label names the language opposite to the source, i.e. the
    /// language the text would have been translated into.
    pub fn fallback_result(request: &TranslationRequest) -> TranslationResult {
        let label = request.from_language.opposite().display_name();
        result_for(request, format!("[{} translation of: {}]", label, request.text))
    }
}

fn result_for(request: &TranslationRequest, translated_text: String) -> TranslationResult {
    TranslationResult {
        original_text: request.text.clone(),
        translated_text,
        from_language: request.from_language,
        to_language: request.to_language,
        context_used: request.audience_type.as_str().to_string(),
    }
}
