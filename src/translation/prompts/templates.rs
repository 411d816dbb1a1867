/*!
 * Prompt templates for gender-aware English/Hebrew translation.
 *
 * The instruction block is a fixed template. When translating into Hebrew
 * for a specific audience, a context sentence chosen from
 * [`AUDIENCE_CONTEXTS`] tells the model which conjugations to use.
 */

use crate::models::{AudienceType, Gender, Language};

/// Context sentence per audience. `{gender}` is replaced with the
/// grammatical gender of the speaker.
///
/// `General` has no entry on purpose: it adds no context.
pub const AUDIENCE_CONTEXTS: &[(AudienceType, &str)] = &[
    (
        AudienceType::Male,
        "The speaker is {gender} and speaking to one male person. Use appropriate Hebrew verb conjugations and forms.",
    ),
    (
        AudienceType::Female,
        "The speaker is {gender} and speaking to one female person. Use appropriate Hebrew verb conjugations and forms.",
    ),
    (
        AudienceType::GroupMales,
        "The speaker is {gender} and speaking to a group of males. Use appropriate Hebrew plural masculine forms.",
    ),
    (
        AudienceType::GroupFemales,
        "The speaker is {gender} and speaking to a group of females. Use appropriate Hebrew plural feminine forms.",
    ),
    (
        AudienceType::MixedGroup,
        "The speaker is {gender} and speaking to a mixed group. Use appropriate Hebrew plural forms (default to masculine plural for mixed groups as per Hebrew grammar rules).",
    ),
];

/// Prompt template for a single translation.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// The default instruction block.
    ///
    /// `{context}` expands to an empty line when no audience context applies.
    pub const CONTEXTUAL_TRANSLATOR: &'static str = r#"You are a professional Hebrew-English translator specializing in contextually accurate translations.

Task: Translate the following text from {source_language} to {target_language}.

{context}

Text to translate: "{text}"

Requirements:
- Provide a natural, conversational translation
- Maintain the tone and intent of the original text
- Use proper grammar and conjugations for the target language
- For Hebrew: Include proper nikud (vowel points) only when necessary for clarity
- Keep cultural nuances and expressions when possible

Respond with only the translated text, no explanations or additional commentary."#;

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default contextual translator template.
    pub fn contextual_translator() -> Self {
        Self::new(Self::CONTEXTUAL_TRANSLATOR)
    }

    /// Render the template with the given variables.
    ///
    /// The source text is substituted last so placeholders typed by the
    /// user are left as they are.
    pub fn render(&self, source_language: &str, target_language: &str, context: Option<&str>, text: &str) -> String {
        let context_line = context
            .map(|sentence| format!("Context: {}", sentence))
            .unwrap_or_default();

        self.template
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language)
            .replace("{context}", &context_line)
            .replace("{text}", text)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::contextual_translator()
    }
}

/// Look up the context sentence for an audience and fill in the speaker's gender.
///
/// Only Hebrew targets carry grammatical context; English output and the
/// `General` audience return `None`.
pub fn context_instruction(to_language: Language, user_gender: Gender, audience: AudienceType) -> Option<String> {
    if to_language != Language::Hebrew || audience == AudienceType::General {
        return None;
    }

    AUDIENCE_CONTEXTS
        .iter()
        .find(|(candidate, _)| *candidate == audience)
        .map(|(_, sentence)| sentence.replace("{gender}", user_gender.grammatical_form()))
}

/// Build the full instruction sent to the model.
pub fn build_prompt(
    text: &str,
    from_language: Language,
    to_language: Language,
    user_gender: Gender,
    audience: AudienceType,
) -> String {
    TranslationPromptBuilder::new(from_language, to_language)
        .with_speaker(user_gender)
        .with_audience(audience)
        .build(text)
}

/// Builder for constructing translation prompts with context.
#[derive(Debug, Clone)]
pub struct TranslationPromptBuilder {
    template: PromptTemplate,
    from_language: Language,
    to_language: Language,
    user_gender: Gender,
    audience: AudienceType,
}

impl TranslationPromptBuilder {
    /// Create a new prompt builder.
    pub fn new(from_language: Language, to_language: Language) -> Self {
        Self {
            template: PromptTemplate::default(),
            from_language,
            to_language,
            user_gender: Gender::default(),
            audience: AudienceType::default(),
        }
    }

    /// Set the speaker's gender.
    pub fn with_speaker(mut self, user_gender: Gender) -> Self {
        self.user_gender = user_gender;
        self
    }

    /// Set who the text is addressed to.
    pub fn with_audience(mut self, audience: AudienceType) -> Self {
        self.audience = audience;
        self
    }

    /// Use a custom template instead of the default one.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// The context sentence this builder will embed, if any.
    pub fn context(&self) -> Option<String> {
        context_instruction(self.to_language, self.user_gender, self.audience)
    }

    /// Build the prompt for the given source text.
    pub fn build(&self, text: &str) -> String {
        let context = self.context();
        self.template.render(
            self.from_language.display_name(),
            self.to_language.display_name(),
            context.as_deref(),
            text,
        )
    }
}
