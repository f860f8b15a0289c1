use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Content language. Every category, subcategory and news item exists in
/// Uzbek and Russian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Uz,
    Ru,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Uz => "uz",
            Language::Ru => "ru",
        }
    }

    /// Picks the name matching this language.
    pub fn pick<'a>(&self, name_uz: &'a str, name_ru: &'a str) -> &'a str {
        match self {
            Language::Uz => name_uz,
            Language::Ru => name_ru,
        }
    }

    /// Parses an optional query value; absent or empty means Uzbek.
    pub fn from_query(value: Option<&str>) -> Result<Self, UnsupportedLanguage> {
        match value.map(str::trim) {
            None | Some("") => Ok(Language::default()),
            Some(v) => v.parse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedLanguage(pub String);

impl fmt::Display for UnsupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported language: {}", self.0)
    }
}

impl std::error::Error for UnsupportedLanguage {}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uz" => Ok(Language::Uz),
            "ru" => Ok(Language::Ru),
            _ => Err(UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
