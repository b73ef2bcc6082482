//! Stylistic guidance derived from a profile.
//!
//! NOTE: this guidance is not part of the compiled prompt sent for analysis.
//! It is exposed on its own endpoint so clients can show or append it.

use crate::locale::Locale;
use crate::models::profile::{AnalogyStyle, KnowledgeLevel, UserProfile};

fn level_lines(locale: Locale, level: KnowledgeLevel) -> [&'static str; 2] {
    match (locale, level) {
        (Locale::En, KnowledgeLevel::Novice) => [
            "Use very simple analogies and avoid technical jargon.",
            "Explain as to someone completely new to the subject.",
        ],
        (Locale::En, KnowledgeLevel::Intermediate) => [
            "Use some technical terms but explain them.",
            "Connect with basic domain concepts.",
        ],
        (Locale::En, KnowledgeLevel::Expert) => [
            "Technical jargon is acceptable without lengthy explanations.",
            "Reference advanced concepts in the field.",
        ],
        (Locale::Fr, KnowledgeLevel::Novice) => [
            "Utilise des analogies très simples et évite le jargon technique.",
            "Explique comme à quelqu'un qui découvre complètement le sujet.",
        ],
        (Locale::Fr, KnowledgeLevel::Intermediate) => [
            "Utilise quelques termes techniques mais explique-les.",
            "Fais le lien avec les concepts de base du domaine.",
        ],
        (Locale::Fr, KnowledgeLevel::Expert) => [
            "Le jargon technique est acceptable sans longues explications.",
            "Fais référence aux concepts avancés du domaine.",
        ],
    }
}

fn style_line(locale: Locale, style: AnalogyStyle) -> &'static str {
    match (locale, style) {
        (Locale::En, AnalogyStyle::Tech) => {
            "Use analogies related to computers, networks and technologies."
        }
        (Locale::En, AnalogyStyle::Nature) => {
            "Use analogies related to nature, animals and ecosystems."
        }
        (Locale::En, AnalogyStyle::Cooking) => {
            "Use analogies related to cooking, recipes and ingredients."
        }
        (Locale::En, AnalogyStyle::Sports) => {
            "Use analogies related to sports, games, training, and athletic performance."
        }
        (Locale::En, AnalogyStyle::PopCulture) => {
            "Use analogies related to movies, series, and popular culture references."
        }
        (Locale::Fr, AnalogyStyle::Tech) => {
            "Utilise des analogies liées aux ordinateurs, aux réseaux et aux technologies."
        }
        (Locale::Fr, AnalogyStyle::Nature) => {
            "Utilise des analogies liées à la nature, aux animaux et aux écosystèmes."
        }
        (Locale::Fr, AnalogyStyle::Cooking) => {
            "Utilise des analogies liées à la cuisine, aux recettes et aux ingrédients."
        }
        (Locale::Fr, AnalogyStyle::Sports) => {
            "Utilise des analogies liées au sport, aux jeux, à l'entraînement et à la performance."
        }
        (Locale::Fr, AnalogyStyle::PopCulture) => {
            "Utilise des analogies liées aux films, aux séries et à la culture populaire."
        }
    }
}

/// Two knowledge-level lines followed by one analogy-style line, joined by `\n`.
pub fn get_prompt_modifier(profile: &UserProfile, locale: Locale) -> String {
    let mut lines = level_lines(locale, profile.knowledge_level).to_vec();
    lines.push(style_line(locale, profile.analogy_style));
    lines.join("\n")
}
