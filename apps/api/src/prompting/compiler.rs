//! Profile-to-prompt compiler.
//!
//! A compiled prompt is the profile-context sentence, a newline, and the base
//! instruction selected by the analysis type. Pure: no clock, no randomness,
//! no shared state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;
use crate::locale::Locale;
use crate::models::analysis::ContentKind;
use crate::models::profile::UserProfile;
use crate::prompting::prompts::{
    InstructionTable, EN_PDF_INSTRUCTIONS, EN_YOUTUBE_INSTRUCTIONS, FR_PDF_INSTRUCTIONS,
    FR_YOUTUBE_INSTRUCTIONS,
};

/// What to do with an analysis type outside the content kind's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownAnalysisPolicy {
    /// Fail with `UnknownAnalysisType`.
    #[default]
    Reject,
    /// Use the last row of the table.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported analysis policy '{0}'")]
pub struct UnsupportedPolicy(pub String);

impl FromStr for UnknownAnalysisPolicy {
    type Err = UnsupportedPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(UnknownAnalysisPolicy::Reject),
            "fallback" => Ok(UnknownAnalysisPolicy::Fallback),
            other => Err(UnsupportedPolicy(other.to_string())),
        }
    }
}

pub fn instruction_table(locale: Locale, kind: ContentKind) -> InstructionTable {
    match (locale, kind) {
        (Locale::En, ContentKind::Pdf) => EN_PDF_INSTRUCTIONS,
        (Locale::En, ContentKind::YouTube) => EN_YOUTUBE_INSTRUCTIONS,
        (Locale::Fr, ContentKind::Pdf) => FR_PDF_INSTRUCTIONS,
        (Locale::Fr, ContentKind::YouTube) => FR_YOUTUBE_INSTRUCTIONS,
    }
}

/// Analysis type labels offered for a content kind, in display order.
pub fn analysis_types(locale: Locale, kind: ContentKind) -> Vec<&'static str> {
    instruction_table(locale, kind)
        .iter()
        .map(|(label, _)| *label)
        .collect()
}

/// The profile-context clause that opens every compiled prompt.
pub fn profile_context(profile: &UserProfile, locale: Locale) -> String {
    let level = locale.knowledge_label(profile.knowledge_level);
    let style = locale.analogy_label(profile.analogy_style);
    match locale {
        Locale::En => format!(
            "The user is in the field of {}, knowledge level: {}, prefers analogies: {}.",
            profile.field, level, style
        ),
        Locale::Fr => format!(
            "L'utilisateur travaille dans le domaine {}, niveau de connaissance : {}, préfère les analogies : {}.",
            profile.field, level, style
        ),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptCompiler {
    policy: UnknownAnalysisPolicy,
}

impl PromptCompiler {
    pub fn new(policy: UnknownAnalysisPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnknownAnalysisPolicy {
        self.policy
    }

    /// Selects the base instruction for `analysis_type`, applying the
    /// unknown-label policy.
    pub fn base_instruction(
        &self,
        locale: Locale,
        kind: ContentKind,
        analysis_type: &str,
    ) -> Result<&'static str, AppError> {
        let table = instruction_table(locale, kind);

        if let Some((_, instruction)) = table.iter().find(|(label, _)| *label == analysis_type) {
            return Ok(*instruction);
        }

        match self.policy {
            UnknownAnalysisPolicy::Fallback => table
                .last()
                .map(|(_, instruction)| *instruction)
                .ok_or_else(|| unknown(kind, analysis_type)),
            UnknownAnalysisPolicy::Reject => Err(unknown(kind, analysis_type)),
        }
    }

    pub fn compile(
        &self,
        locale: Locale,
        kind: ContentKind,
        analysis_type: &str,
        profile: &UserProfile,
    ) -> Result<String, AppError> {
        let base = self.base_instruction(locale, kind, analysis_type)?;
        Ok(format!("{}\n{}", profile_context(profile, locale), base))
    }
}

fn unknown(kind: ContentKind, analysis_type: &str) -> AppError {
    AppError::UnknownAnalysisType {
        kind: kind.to_string(),
        label: analysis_type.to_string(),
    }
}

/// English prompt with the rejecting policy.
#[cfg(test)]
pub fn compile_prompt(
    kind: ContentKind,
    analysis_type: &str,
    profile: &UserProfile,
) -> Result<String, AppError> {
    PromptCompiler::default().compile(Locale::En, kind, analysis_type, profile)
}
