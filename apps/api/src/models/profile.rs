use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeLevel {
    Novice,
    Intermediate,
    Expert,
}

impl KnowledgeLevel {
    pub const ALL: [KnowledgeLevel; 3] = [
        KnowledgeLevel::Novice,
        KnowledgeLevel::Intermediate,
        KnowledgeLevel::Expert,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalogyStyle {
    Tech,
    Nature,
    Cooking,
    Sports,
    PopCulture,
}

impl AnalogyStyle {
    pub const ALL: [AnalogyStyle; 5] = [
        AnalogyStyle::Tech,
        AnalogyStyle::Nature,
        AnalogyStyle::Cooking,
        AnalogyStyle::Sports,
        AnalogyStyle::PopCulture,
    ];
}

/// A user's stated expertise and preferences. Replaced wholesale, never
/// mutated field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub field: String,
    pub knowledge_level: KnowledgeLevel,
    pub analogy_style: AnalogyStyle,
    pub include_citations: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::default_for(Locale::En)
    }
}

impl UserProfile {
    /// Default profile: the locale's default field, intermediate level,
    /// tech analogies, no citations.
    pub fn default_for(locale: Locale) -> Self {
        Self {
            field: locale.vocabulary().default_field.to_string(),
            knowledge_level: KnowledgeLevel::Intermediate,
            analogy_style: AnalogyStyle::Tech,
            include_citations: false,
        }
    }

    /// Level and style are always present by construction, so completeness
    /// reduces to a non-blank field.
    pub fn is_complete(&self) -> bool {
        !self.field.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(AppError::InvalidProfile(
                "field must not be empty".to_string(),
            ))
        }
    }

    /// Builds a profile from localized form labels. Missing, null and blank
    /// values are all `InvalidProfile`.
    pub fn from_submission(
        submission: &ProfileSubmission,
        locale: Locale,
    ) -> Result<Self, AppError> {
        let field = required("field", submission.field.as_deref())?;
        let knowledge_level = parse_label(
            "knowledge_level",
            submission.knowledge_level.as_deref(),
            |label| locale.parse_knowledge_level(label),
            locale,
        )?;
        let analogy_style = parse_label(
            "analogy_style",
            submission.analogy_style.as_deref(),
            |label| locale.parse_analogy_style(label),
            locale,
        )?;

        let profile = Self {
            field: field.to_string(),
            knowledge_level,
            analogy_style,
            include_citations: submission.include_citations,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// One-line summary shown above every analysis result.
    pub fn caption(&self, locale: Locale) -> String {
        let level = locale.knowledge_label(self.knowledge_level);
        let style = locale.analogy_label(self.analogy_style);
        match locale {
            Locale::En => format!(
                "Field: {} | Level: {} | Analogy style: {}",
                self.field, level, style
            ),
            Locale::Fr => format!(
                "Domaine : {} | Niveau : {} | Style d'analogies : {}",
                self.field, level, style
            ),
        }
    }
}

fn required<'a>(name: &str, raw: Option<&'a str>) -> Result<&'a str, AppError> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::InvalidProfile(format!("{name} must not be empty"))),
    }
}

fn parse_label<T>(
    name: &str,
    raw: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
    locale: Locale,
) -> Result<T, AppError> {
    let label = required(name, raw)?;
    parse(label).ok_or_else(|| {
        AppError::InvalidProfile(format!(
            "unknown {name} '{label}' for locale '{locale}'"
        ))
    })
}

/// Raw profile form as submitted by the client, using localized labels.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSubmission {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub knowledge_level: Option<String>,
    #[serde(default)]
    pub analogy_style: Option<String>,
    #[serde(default)]
    pub include_citations: bool,
}

/// Profile as returned to the client, with localized labels.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub field: String,
    pub knowledge_level: String,
    pub analogy_style: String,
    pub include_citations: bool,
    pub is_complete: bool,
    pub caption: String,
}

impl ProfileView {
    pub fn new(profile: &UserProfile, locale: Locale) -> Self {
        Self {
            field: profile.field.clone(),
            knowledge_level: locale.knowledge_label(profile.knowledge_level).to_string(),
            analogy_style: locale.analogy_label(profile.analogy_style).to_string(),
            include_citations: profile.include_citations,
            is_complete: profile.is_complete(),
            caption: profile.caption(locale),
        }
    }
}
