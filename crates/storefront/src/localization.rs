//! Localization resolution from URL path segments.
//!
//! Storefront routes may be prefixed with a language segment such as
//! `/en-us/...` or `/fr-ca/...`. The segment resolves to a `(country,
//! language)` pair that scopes catalog queries via the `@inContext`
//! directive. Resolution never fails: anything unrecognized falls back to
//! the default pair.

use serde::Serialize;

/// ISO 3166-1 alpha-2 country code, uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCode(String);

/// ISO 639-1 language code, uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageCode(String);

/// A `(country, language)` pair scoping a catalog query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Localization {
    pub country: CountryCode,
    pub language: LanguageCode,
}

impl CountryCode {
    /// Default country for unrecognized or absent segments.
    #[must_use]
    pub fn default_country() -> Self {
        Self("US".to_string())
    }

    /// Parse a country code, falling back to the default when the input is
    /// not two ASCII letters.
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        if raw.len() == 2 && raw.chars().all(|c| c.is_ascii_alphabetic()) {
            Self(raw.to_ascii_uppercase())
        } else {
            Self::default_country()
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl LanguageCode {
    /// Default language for unrecognized or absent segments.
    #[must_use]
    pub fn default_language() -> Self {
        Self("EN".to_string())
    }

    /// Parse a language code, falling back to the default when the input is
    /// not two or three ASCII letters.
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        if (2..=3).contains(&raw.len()) && raw.chars().all(|c| c.is_ascii_alphabetic()) {
            Self(raw.to_ascii_uppercase())
        } else {
            Self::default_language()
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self {
            country: CountryCode::default_country(),
            language: LanguageCode::default_language(),
        }
    }
}

impl std::fmt::Display for Localization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.language.as_str(), self.country.as_str())
    }
}

/// Resolve a localization pair from an optional `lang-country` path segment.
///
/// Segments without a `-` separator (or absent entirely) resolve to the
/// default pair. Each half falls back independently, so `en-??` still yields
/// English with the default country.
#[must_use]
pub fn get_localization_from_lang(lang: Option<&str>) -> Localization {
    let Some(lang) = lang else {
        return Localization::default();
    };

    match lang.split_once('-') {
        Some((language, country)) => Localization {
            country: CountryCode::parse_or_default(country),
            language: LanguageCode::parse_or_default(language),
        },
        None => Localization::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_segment_defaults() {
        let loc = get_localization_from_lang(None);
        assert_eq!(loc.country.as_str(), "US");
        assert_eq!(loc.language.as_str(), "EN");
    }

    #[test]
    fn test_lowercase_segment_uppercased() {
        let loc = get_localization_from_lang(Some("fr-ca"));
        assert_eq!(loc.country.as_str(), "CA");
        assert_eq!(loc.language.as_str(), "FR");
    }

    #[test]
    fn test_segment_without_separator_defaults() {
        let loc = get_localization_from_lang(Some("en"));
        assert_eq!(loc, Localization::default());
    }

    #[test]
    fn test_garbage_segment_defaults() {
        let loc = get_localization_from_lang(Some("not a locale"));
        assert_eq!(loc, Localization::default());
    }

    #[test]
    fn test_invalid_country_falls_back_independently() {
        let loc = get_localization_from_lang(Some("de-12345"));
        assert_eq!(loc.language.as_str(), "DE");
        assert_eq!(loc.country.as_str(), "US");
    }

    #[test]
    fn test_three_letter_language_accepted() {
        let loc = get_localization_from_lang(Some("fil-ph"));
        assert_eq!(loc.language.as_str(), "FIL");
        assert_eq!(loc.country.as_str(), "PH");
    }

    #[test]
    fn test_display_format() {
        let loc = get_localization_from_lang(Some("pt-br"));
        assert_eq!(loc.to_string(), "PT-BR");
    }

    #[test]
    fn test_serializes_as_uppercase_strings() {
        let loc = get_localization_from_lang(Some("ja-jp"));
        let json = serde_json::to_value(&loc).expect("serializable");
        assert_eq!(json["country"], "JP");
        assert_eq!(json["language"], "JA");
    }
}
