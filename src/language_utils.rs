/*!
 * Language utilities for script detection and language code handling.
 *
 * Detection is script based: any code point from the Hebrew Unicode block
 * marks the text as Hebrew, everything else is treated as English.
 */

use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Language;

/// Any code point of the Hebrew block, U+0590 to U+05FF
static HEBREW_SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{0590}-\x{05FF}]").expect("Hebrew block pattern is valid")
});

/// Detect the language of a text by looking for Hebrew characters
pub fn detect_language(text: &str) -> Language {
    if contains_hebrew(text) {
        Language::Hebrew
    } else {
        Language::English
    }
}

/// Check whether the text contains any character of the Hebrew block
pub fn contains_hebrew(text: &str) -> bool {
    HEBREW_SCRIPT.is_match(text)
}

/// Normalize an ISO 639-1 or ISO 639-2 code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    // "iw" is the withdrawn ISO 639-1 code for Hebrew, still emitted by some platforms
    if normalized_code == "iw" {
        return Ok("heb".to_string());
    }

    if normalized_code.len() == 2 {
        if let Some(lang) = isolang::Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 && isolang::Language::from_639_3(&normalized_code).is_some() {
        return Ok(normalized_code);
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Parse a supported language from its name or an ISO code
///
/// Accepts `english`/`hebrew` as well as `en`, `eng`, `he`, `heb` and `iw`,
/// case-insensitively. Valid codes of unsupported languages are rejected.
pub fn parse_language(value: &str) -> Result<Language> {
    let normalized = value.trim().to_lowercase();
    match normalized.as_str() {
        "english" => return Ok(Language::English),
        "hebrew" => return Ok(Language::Hebrew),
        _ => {}
    }

    let part2t = normalize_to_part2t(&normalized)
        .map_err(|_| anyhow!("Unknown language: {}", value))?;

    match part2t.as_str() {
        "eng" => Ok(Language::English),
        "heb" => Ok(Language::Hebrew),
        _ => Err(anyhow!(
            "Unsupported language: {} ({}); only English and Hebrew are supported",
            value,
            get_language_name(&part2t).unwrap_or_else(|_| part2t.clone())
        )),
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = isolang::Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
