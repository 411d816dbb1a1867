/*!
 * Tests for the shared domain types
 */

use baba::models::{AudienceType, Gender, Language, TranslationRequest, TranslationResult, UserSettings};

#[test]
fn test_translationRequest_detected_shouldFlipDetectedLanguage() {
    let english = TranslationRequest::detected("Hello", Gender::Male, AudienceType::General);
    assert_eq!(english.from_language, Language::English);
    assert_eq!(english.to_language, Language::Hebrew);

    let hebrew = TranslationRequest::detected("שלום", Gender::Female, AudienceType::Female);
    assert_eq!(hebrew.from_language, Language::Hebrew);
    assert_eq!(hebrew.to_language, Language::English);
    assert_eq!(hebrew.user_gender, Gender::Female);
}

#[test]
fn test_audienceType_fromStr_shouldAcceptDashedAndSnakeCase() {
    assert_eq!("group-males".parse::<AudienceType>().unwrap(), AudienceType::GroupMales);
    assert_eq!("mixed_group".parse::<AudienceType>().unwrap(), AudienceType::MixedGroup);
    assert_eq!(" General ".parse::<AudienceType>().unwrap(), AudienceType::General);
    assert!("everyone".parse::<AudienceType>().is_err());
}

#[test]
fn test_audienceType_deserialize_withUnknownValue_shouldBeGeneral() {
    let audience: AudienceType = serde_json::from_str("\"group_aliens\"").unwrap();
    assert_eq!(audience, AudienceType::General);
}

#[test]
fn test_audienceType_all_shouldListEveryVariantOnce() {
    let mut names: Vec<_> = AudienceType::ALL.iter().map(|a| a.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 6);
}

#[test]
fn test_gender_fromStr_shouldAcceptShortForms() {
    assert_eq!("F".parse::<Gender>().unwrap(), Gender::Female);
    assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
    assert!("x".parse::<Gender>().is_err());
}

#[test]
fn test_userSettings_default_shouldBeMaleEnglish() {
    let settings = UserSettings::default();
    assert_eq!(settings.user_gender, Gender::Male);
    assert_eq!(settings.preferred_language, Language::English);
}

#[test]
fn test_translationResult_serialize_shouldUseCamelCaseKeys() {
    let result = TranslationResult {
        original_text: "Hello".to_string(),
        translated_text: "שלום".to_string(),
        from_language: Language::English,
        to_language: Language::Hebrew,
        context_used: "general".to_string(),
    };

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["originalText"], "Hello");
    assert_eq!(value["translatedText"], "שלום");
    assert_eq!(value["fromLanguage"], "english");
    assert_eq!(value["toLanguage"], "hebrew");
    assert_eq!(value["contextUsed"], "general");
}
