//! The languages Environment Canada publishes AQHI names in, and the catalog
//! attribute keys that go with each of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A language code that is not one of the published AQHI languages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported language '{0}', expected one of: EN, FR")]
pub struct UnsupportedLanguageError(pub String);

/// Language used for zone names, region names and daily forecast period labels.
///
/// Parsing is case-insensitive, so `"en"`, `"En"` and `"EN"` all select [`Language::English`].
///
/// # Examples
///
/// ```
/// use ec_aqhi::Language;
///
/// let language: Language = "fr".parse().unwrap();
/// assert_eq!(language, Language::French);
/// assert_eq!(language.code(), "FR");
/// assert!("de".parse::<Language>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    French,
}

impl Language {
    /// The upper-case code used in `lang` attributes of forecast documents.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "EN",
            Language::French => "FR",
        }
    }

    /// Attribute holding the zone name on `EC_administrativeZone` elements.
    pub(crate) fn zone_name_attribute(&self) -> &'static str {
        match self {
            Language::English => "name_en_CA",
            Language::French => "name_fr_CA",
        }
    }

    /// Attribute holding the region name on `region` elements.
    pub(crate) fn region_name_attribute(&self) -> &'static str {
        match self {
            Language::English => "nameEn",
            Language::French => "nameFr",
        }
    }

    pub(crate) fn matches_code(&self, code: &str) -> bool {
        self.code().eq_ignore_ascii_case(code.trim())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EN" => Ok(Language::English),
            "FR" => Ok(Language::French),
            _ => Err(UnsupportedLanguageError(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
