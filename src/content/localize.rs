//! Bilingual projection of single-language content
//!
//! Documents are authored in one language. Every language-bearing field is
//! exposed as `{en, ar}`: the authored side carries the value and the other
//! side carries a fixed "not available yet" placeholder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown on the English side of Arabic-only content
pub const EN_PLACEHOLDER: &str = "Not available in English yet";

/// Shown on the Arabic side of English-only content
pub const AR_PLACEHOLDER: &str = "غير متوفر بالعربية حالياً";

/// Message for an empty collection
pub const NO_CONTENT: StaticText = StaticText {
    en: "No items available at the moment",
    ar: "لا توجد عناصر متاحة حالياً",
};

/// Message for an unknown id
pub const NOT_FOUND: StaticText = StaticText {
    en: "Content Not Found",
    ar: "المحتوى غير موجود",
};

/// Authoring language of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// Parse a language tag; anything but `en`/`ar` falls back to English
    pub fn parse(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("en") => Language::En,
            Some("ar") => Language::Ar,
            Some(other) => {
                tracing::warn!("Unsupported language '{}', treating content as English", other);
                Language::En
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            other => Err(format!("unknown language '{}', expected en or ar", other)),
        }
    }
}

/// A value carried in both languages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub ar: String,
}

impl LocalizedText {
    /// Place `value` on the authored side and the placeholder on the other
    pub fn resolve(value: impl Into<String>, language: Language) -> Self {
        match language {
            Language::En => Self {
                en: value.into(),
                ar: AR_PLACEHOLDER.to_string(),
            },
            Language::Ar => Self {
                en: EN_PLACEHOLDER.to_string(),
                ar: value.into(),
            },
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }

    /// Whether the given side holds real content rather than a placeholder
    pub fn is_authored(&self, language: Language) -> bool {
        match language {
            Language::En => self.en != EN_PLACEHOLDER,
            Language::Ar => self.ar != AR_PLACEHOLDER,
        }
    }
}

/// Fixed UI text known at compile time
#[derive(Debug, Clone, Copy)]
pub struct StaticText {
    pub en: &'static str,
    pub ar: &'static str,
}

impl StaticText {
    pub fn get(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.en,
            Language::Ar => self.ar,
        }
    }
}
