/*!
 * Integration tests for the translation service
 */

use baba::app_config::Config;
use baba::errors::{ProviderError, TranslationError};
use baba::models::{AudienceType, Gender, Language, TranslationRequest};
use baba::providers::mock::{MockBehavior, MockProvider};
use baba::providers::openai::{OpenAI, PLACEHOLDER_API_KEY};
use baba::translation::{TranslationOutcome, TranslationService};

use crate::common::{self, UNREACHABLE_ENDPOINT};

fn english_request(text: &str, audience: AudienceType) -> TranslationRequest {
    TranslationRequest::new(text, Language::English, Language::Hebrew, Gender::Male, audience)
}

/// Test the happy path: trimmed completion and audience reported as context
#[tokio::test]
async fn test_translate_withWorkingProvider_shouldReturnTrimmedCompletion() {
    common::init_logging();
    let config = Config::default();
    let provider = MockProvider::working().with_custom_response(|_| "  שלום  \n".to_string());
    let service = TranslationService::with_provider(provider.clone(), &config.translation);

    let result = service.translate(&english_request("Hello", AudienceType::Female)).await;

    assert_eq!(result.translated_text, "שלום");
    assert_eq!(result.original_text, "Hello");
    assert_eq!(result.context_used, "female");
    assert_eq!(provider.request_count(), 1);
}

/// Test that the configured model settings reach the request
#[tokio::test]
async fn test_translate_shouldSendSingleUserMessageWithConfiguredModel() {
    let mut config = Config::default();
    config.translation.model = "gpt-4o-mini".to_string();
    let provider = MockProvider::working();
    let service = TranslationService::with_provider(provider.clone(), &config.translation);

    service.translate(&english_request("Good night", AudienceType::MixedGroup)).await;

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model(), "gpt-4o-mini");
    assert_eq!(requests[0].messages().len(), 1);
    assert_eq!(requests[0].messages()[0].role, "user");
    assert!(requests[0].messages()[0].content.contains("speaking to a mixed group"));
}

/// Test that an empty completion produces the fixed failure text, not a fallback
#[tokio::test]
async fn test_translate_withEmptyCompletion_shouldReturnFailureText() {
    let config = Config::default();
    let service = TranslationService::with_provider(MockProvider::empty(), &config.translation);

    let report = service.translate_with_outcome(&english_request("Hello", AudienceType::General)).await;

    assert!(matches!(report.outcome, TranslationOutcome::Translated));
    assert_eq!(report.result.translated_text, "Translation failed");
}

/// Test fallback for each failure mode
#[tokio::test]
async fn test_translate_withFailingProviders_shouldReturnPlaceholder() {
    let config = Config::default();
    let behaviors = [
        MockBehavior::Failing { status_code: 500 },
        MockBehavior::Failing { status_code: 429 },
        MockBehavior::Offline,
        MockBehavior::Unauthorized,
    ];

    for behavior in behaviors {
        let service = TranslationService::with_provider(MockProvider::new(behavior), &config.translation);
        let result = service.translate(&english_request("Hello", AudienceType::Male)).await;

        assert_eq!(result.translated_text, "[Hebrew translation of: Hello]", "behavior {:?}", behavior);
        assert_eq!(result.context_used, "male");
    }
}

/// Test that retries are not attempted
#[tokio::test]
async fn test_translate_afterFailure_shouldNotRetry() {
    let config = Config::default();
    let provider = MockProvider::failing();
    let service = TranslationService::with_provider(provider.clone(), &config.translation);

    service.translate(&english_request("Hello", AudienceType::General)).await;

    assert_eq!(provider.request_count(), 1);
}

/// Test the real client against a closed port
#[tokio::test]
async fn test_translate_withUnreachableEndpoint_shouldFallBack() {
    common::init_logging();
    let config = Config::default();
    let provider = OpenAI::new("sk-test", UNREACHABLE_ENDPOINT);
    let service = TranslationService::with_provider(provider, &config.translation);
    let request = TranslationRequest::detected("מה נשמע", Gender::Female, AudienceType::General);

    let report = service.translate_with_outcome(&request).await;

    assert_eq!(report.result.translated_text, "[English translation of: מה נשמע]");
    assert!(matches!(
        report.outcome,
        TranslationOutcome::Fallback(TranslationError::Provider(ProviderError::ConnectionError(_)))
    ));
}

/// Test that a missing credential falls back without a network call
#[tokio::test]
async fn test_translate_withoutApiKey_shouldFallBackWithAuthenticationError() {
    let config = Config::default();
    let provider = OpenAI::new(PLACEHOLDER_API_KEY, UNREACHABLE_ENDPOINT);
    let service = TranslationService::with_provider(provider, &config.translation);

    let report = service.translate_with_outcome(&english_request("Hello", AudienceType::General)).await;

    match report.outcome {
        TranslationOutcome::Fallback(TranslationError::Provider(e)) => assert!(e.is_authentication()),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

/// Test that a same-language request is rejected before sending
#[tokio::test]
async fn test_tryTranslate_withSameLanguages_shouldFailWithoutRequest() {
    let config = Config::default();
    let provider = MockProvider::working();
    let service = TranslationService::with_provider(provider.clone(), &config.translation);
    let request = TranslationRequest::new("Hello", Language::English, Language::English, Gender::Male, AudienceType::General);

    let result = service.try_translate(&request).await;

    assert!(matches!(result, Err(TranslationError::SameLanguage(_))));
    assert_eq!(provider.request_count(), 0);
}
