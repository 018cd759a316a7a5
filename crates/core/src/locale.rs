//! Language and theme preferences.
//!
//! Only preference handling lives here: which language a request should be
//! answered in and which theme the user picked. Translation catalogs are the
//! client's concern.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Name of the cookie carrying the user's locale choice.
pub const LOCALE_COOKIE: &str = "locale";

/// Cookie lifetime: one year.
pub const LOCALE_COOKIE_MAX_AGE_SECS: i64 = 365 * 24 * 60 * 60;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US", alias = "en")]
    EnUs,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::PtBr, Language::EnUs];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::PtBr => "pt-BR",
            Language::EnUs => "en-US",
        }
    }

    /// Match a BCP-47-ish tag loosely: `pt`, `pt-br`, `pt_PT` all map to
    /// Portuguese; `en`, `en-GB` to English.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "pt" => Some(Language::PtBr),
            "en" => Some(Language::EnUs),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pt-BR" => Ok(Language::PtBr),
            "en-US" | "en" => Ok(Language::EnUs),
            other => Err(CoreError::validation(format!(
                "Unsupported language '{other}'. Must be one of: pt-BR, en-US"
            ))),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(CoreError::validation(format!(
                "Unsupported theme '{other}'. Must be one of: light, dark, system"
            ))),
        }
    }
}

impl TryFrom<String> for Theme {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Pick the language for a request.
///
/// The locale cookie wins when it holds a supported value. Otherwise the
/// `Accept-Language` header is scanned in order (quality values are
/// ignored) and the first supported tag is used. Falls back to the default.
pub fn negotiate(cookie: Option<&str>, accept_language: Option<&str>) -> Language {
    if let Some(lang) = cookie.and_then(|c| c.parse::<Language>().ok()) {
        return lang;
    }

    accept_language
        .into_iter()
        .flat_map(|header| header.split(','))
        .filter_map(|entry| entry.split(';').next())
        .find_map(Language::from_tag)
        .unwrap_or_default()
}

/// Build the `Set-Cookie` value that persists a locale choice.
pub fn locale_cookie(language: Language) -> String {
    format!(
        "{LOCALE_COOKIE}={}; Path=/; Max-Age={LOCALE_COOKIE_MAX_AGE_SECS}; SameSite=Lax",
        language.as_str()
    )
}
