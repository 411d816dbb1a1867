/*!
 * Domain types shared by the settings store, the prompt builder and the
 * translation service.
 *
 * Serialized names match the persisted settings record and the values
 * accepted on the command line.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::language_utils;

/// Grammatical gender of the person speaking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Lowercase identifier used in storage and on the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Grammatical adjective used inside prompts
    pub fn grammatical_form(&self) -> &'static str {
        match self {
            Self::Male => "masculine",
            Self::Female => "feminine",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(anyhow::anyhow!("Invalid gender: {}", s)),
        }
    }
}

/// One of the two supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hebrew,
}

impl Language {
    /// Capitalized name used in prompts and placeholder text
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hebrew => "Hebrew",
        }
    }

    /// Lowercase identifier used in storage and on the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Hebrew => "hebrew",
        }
    }

    /// The other supported language
    pub fn opposite(&self) -> Self {
        match self {
            Self::English => Self::Hebrew,
            Self::Hebrew => Self::English,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        language_utils::parse_language(s)
    }
}

/// Who the translated text is addressed to
///
/// Selects the Hebrew conjugation context added to the prompt. Unknown
/// serialized values are read as `General`, which adds no context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AudienceType {
    /// One male person
    Male,
    /// One female person
    Female,
    /// A group of males
    GroupMales,
    /// A group of females
    GroupFemales,
    /// A group of males and females
    MixedGroup,
    /// No specific audience
    #[default]
    #[serde(other)]
    General,
}

impl AudienceType {
    /// All audience types in the order they are offered to the user
    pub const ALL: [AudienceType; 6] = [
        Self::General,
        Self::Male,
        Self::Female,
        Self::GroupMales,
        Self::GroupFemales,
        Self::MixedGroup,
    ];

    /// Snake-case identifier, also reported as `context_used` in results
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::GroupMales => "group_males",
            Self::GroupFemales => "group_females",
            Self::MixedGroup => "mixed_group",
            Self::General => "general",
        }
    }

    /// Short label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Male => "To Male",
            Self::Female => "To Female",
            Self::GroupMales => "To Males",
            Self::GroupFemales => "To Females",
            Self::MixedGroup => "Mixed Group",
        }
    }
}

impl fmt::Display for AudienceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AudienceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|audience| audience.as_str() == normalized)
            .ok_or_else(|| anyhow::anyhow!("Invalid audience type: {}", s))
    }
}

/// User preferences persisted on the device
///
/// Fields missing from a stored record take their default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    /// Gender of the person using the app
    pub user_gender: Gender,
    /// Language the user prefers to work in
    pub preferred_language: Language,
}

/// A single translation attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: String,
    pub from_language: Language,
    pub to_language: Language,
    pub user_gender: Gender,
    pub audience_type: AudienceType,
}

impl TranslationRequest {
    /// Create a request with an explicit direction
    pub fn new(
        text: impl Into<String>,
        from_language: Language,
        to_language: Language,
        user_gender: Gender,
        audience_type: AudienceType,
    ) -> Self {
        Self {
            text: text.into(),
            from_language,
            to_language,
            user_gender,
            audience_type,
        }
    }

    /// Create a request whose source language is detected from the text
    /// and whose target is the other supported language
    pub fn detected(text: impl Into<String>, user_gender: Gender, audience_type: AudienceType) -> Self {
        let text = text.into();
        let from_language = language_utils::detect_language(&text);
        Self::new(text, from_language, from_language.opposite(), user_gender, audience_type)
    }
}

/// Outcome of a translation attempt, real or placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    pub from_language: Language,
    pub to_language: Language,
    pub context_used: String,
}
