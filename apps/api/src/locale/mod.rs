//! Localized vocabulary for the profile form and the prompt templates.
//!
//! Each locale owns its own labels (e.g. "Cooking" in English, "Cuisine" in
//! French). Enumerated values are matched by label within the session locale.

pub mod en;
pub mod fr;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::profile::{AnalogyStyle, KnowledgeLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

/// Static vocabulary of one locale.
pub struct Vocabulary {
    pub fields: &'static [&'static str],
    pub default_field: &'static str,
    pub knowledge_levels: &'static [(KnowledgeLevel, &'static str)],
    /// (style, label, description)
    pub analogy_styles: &'static [(AnalogyStyle, &'static str, &'static str)],
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    pub fn vocabulary(self) -> &'static Vocabulary {
        match self {
            Locale::En => &en::VOCABULARY,
            Locale::Fr => &fr::VOCABULARY,
        }
    }

    pub fn knowledge_label(self, level: KnowledgeLevel) -> &'static str {
        self.vocabulary()
            .knowledge_levels
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, label)| *label)
            .unwrap_or_default()
    }

    pub fn analogy_label(self, style: AnalogyStyle) -> &'static str {
        self.vocabulary()
            .analogy_styles
            .iter()
            .find(|(s, _, _)| *s == style)
            .map(|(_, label, _)| *label)
            .unwrap_or_default()
    }

    pub fn analogy_description(self, style: AnalogyStyle) -> &'static str {
        self.vocabulary()
            .analogy_styles
            .iter()
            .find(|(s, _, _)| *s == style)
            .map(|(_, _, description)| *description)
            .unwrap_or_default()
    }

    pub fn parse_knowledge_level(self, label: &str) -> Option<KnowledgeLevel> {
        self.vocabulary()
            .knowledge_levels
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(level, _)| *level)
    }

    pub fn parse_analogy_style(self, label: &str) -> Option<AnalogyStyle> {
        self.vocabulary()
            .analogy_styles
            .iter()
            .find(|(_, l, _)| *l == label)
            .map(|(style, _, _)| *style)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale '{0}'")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            other => Err(UnsupportedLocale(other.to_string())),
        }
    }
}
