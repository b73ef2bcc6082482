use super::Vocabulary;
use crate::models::profile::{AnalogyStyle, KnowledgeLevel};

pub static VOCABULARY: Vocabulary = Vocabulary {
    fields: &[
        "Informatique",
        "Intelligence artificielle",
        "Développement web",
        "Science des données",
        "Cybersécurité",
        "Médecine",
        "Biologie",
        "Physique",
        "Mathématiques",
        "Psychologie",
        "Économie",
        "Droit",
        "Philosophie",
        "Autre",
    ],
    default_field: "Informatique",
    knowledge_levels: &[
        (KnowledgeLevel::Novice, "Novice"),
        (KnowledgeLevel::Intermediate, "Intermédiaire"),
        (KnowledgeLevel::Expert, "Expert"),
    ],
    analogy_styles: &[
        (
            AnalogyStyle::Tech,
            "Tech",
            "Utiliser des analogies technologiques (ordinateurs, réseaux, etc.)",
        ),
        (
            AnalogyStyle::Nature,
            "Nature",
            "Utiliser des analogies liées à la nature (écosystèmes, animaux, etc.)",
        ),
        (
            AnalogyStyle::Cooking,
            "Cuisine",
            "Utiliser des analogies culinaires (recettes, ingrédients, etc.)",
        ),
        (
            AnalogyStyle::Sports,
            "Sport",
            "Utiliser des analogies sportives (règles du jeu, stratégies, etc.)",
        ),
        (
            AnalogyStyle::PopCulture,
            "Culture Pop",
            "Utiliser des références à la culture populaire (films, séries, etc.)",
        ),
    ],
};
