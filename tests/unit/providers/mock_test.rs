/*!
 * Tests for the mock provider failure modes
 */

use baba::errors::ProviderError;
use baba::providers::Provider;
use baba::providers::mock::{MockBehavior, MockProvider};
use baba::providers::openai::OpenAIRequest;

fn request() -> OpenAIRequest {
    OpenAIRequest::new("gpt-4").add_message("user", "Hello")
}

#[tokio::test]
async fn test_mockProvider_intermittent_shouldFailEveryNthRequest() {
    let provider = MockProvider::new(MockBehavior::Intermittent { fail_every: 3 });

    let mut failures = 0;
    for _ in 0..6 {
        if provider.complete(request()).await.is_err() {
            failures += 1;
        }
    }

    assert_eq!(failures, 2);
    assert_eq!(provider.request_count(), 6);
}

#[tokio::test]
async fn test_mockProvider_unauthorized_shouldReportAuthentication() {
    let provider = MockProvider::new(MockBehavior::Unauthorized);

    let err = provider.complete(request()).await.unwrap_err();
    assert!(err.is_authentication());
    assert!(provider.test_connection().await.is_err());
}

#[tokio::test]
async fn test_mockProvider_quotaStatus_shouldBeClassified() {
    let provider = MockProvider::new(MockBehavior::Failing { status_code: 429 });

    let err = provider.complete(request()).await.unwrap_err();
    assert!(err.is_quota_exceeded());
    assert!(matches!(err, ProviderError::ApiError { status_code: 429, .. }));
}

#[tokio::test]
async fn test_mockProvider_clones_shouldShareRequestLog() {
    let provider = MockProvider::working().with_custom_response(|req| format!("echo {}", req.messages().len()));
    let clone = provider.clone();

    let response = clone.complete(request()).await.unwrap();

    assert_eq!(MockProvider::extract_text(&response).as_deref(), Some("echo 1"));
    assert_eq!(provider.request_count(), 1);
    assert_eq!(provider.requests()[0].model(), "gpt-4");
}
