/*!
 * Tests for prompt construction
 */

use baba::models::{AudienceType, Gender, Language};
use baba::translation::prompts::{AUDIENCE_CONTEXTS, PromptTemplate, TranslationPromptBuilder, build_prompt, context_instruction};

/// Test the context line for a female speaker addressing a group of females
#[test]
fn test_build_prompt_withGroupFemales_shouldIncludeFeminineContext() {
    let prompt = build_prompt("Come in", Language::English, Language::Hebrew, Gender::Female, AudienceType::GroupFemales);

    assert!(prompt.contains(
        "Context: The speaker is feminine and speaking to a group of females. Use appropriate Hebrew plural feminine forms."
    ));
    assert!(prompt.contains("Text to translate: \"Come in\""));
}

/// Test that English targets never carry grammatical context
#[test]
fn test_build_prompt_toEnglish_shouldOmitContext() {
    for audience in AudienceType::ALL {
        let prompt = build_prompt("שלום", Language::Hebrew, Language::English, Gender::Male, audience);
        assert!(!prompt.contains("Context:"), "unexpected context for {}", audience);
        assert!(prompt.contains("from Hebrew to English"));
    }
}

/// Test that the general audience adds nothing
#[test]
fn test_build_prompt_withGeneralAudience_shouldOmitContext() {
    let prompt = build_prompt("Hello", Language::English, Language::Hebrew, Gender::Female, AudienceType::General);
    assert!(!prompt.contains("Context:"));
    assert!(!prompt.contains("speaker"));
}

/// Test that the mixed group defaults to masculine plural
#[test]
fn test_context_instruction_withMixedGroup_shouldMentionMasculinePlural() {
    let context = context_instruction(Language::Hebrew, Gender::Male, AudienceType::MixedGroup).unwrap();
    assert!(context.starts_with("The speaker is masculine and speaking to a mixed group."));
    assert!(context.contains("default to masculine plural"));
}

/// Test that every non-general audience has a table entry
#[test]
fn test_audience_contexts_shouldCoverEverySpecificAudience() {
    for audience in AudienceType::ALL.iter().filter(|a| **a != AudienceType::General) {
        assert!(AUDIENCE_CONTEXTS.iter().any(|(candidate, _)| candidate == audience));
    }
    assert!(AUDIENCE_CONTEXTS.iter().all(|(_, sentence)| sentence.contains("{gender}")));
}

/// Test that placeholder-like text typed by the user is preserved
#[test]
fn test_build_prompt_withBracesInText_shouldKeepThemVerbatim() {
    let prompt = build_prompt("say {context} and {target_language}", Language::English, Language::Hebrew, Gender::Male, AudienceType::Male);
    assert!(prompt.contains("\"say {context} and {target_language}\""));
}

/// Test the builder with a custom template
#[test]
fn test_promptBuilder_withCustomTemplate_shouldRenderAllPlaceholders() {
    let builder = TranslationPromptBuilder::new(Language::English, Language::Hebrew)
        .with_speaker(Gender::Female)
        .with_audience(AudienceType::Male)
        .with_template(PromptTemplate::new("{source_language}>{target_language}|{context}|{text}"));

    assert_eq!(
        builder.build("hi"),
        "English>Hebrew|Context: The speaker is feminine and speaking to one male person. Use appropriate Hebrew verb conjugations and forms.|hi"
    );
}
