use super::Vocabulary;
use crate::models::profile::{AnalogyStyle, KnowledgeLevel};

pub static VOCABULARY: Vocabulary = Vocabulary {
    fields: &[
        "Computer Science",
        "Artificial Intelligence",
        "Web Development",
        "Data Science",
        "Cybersecurity",
        "Medicine",
        "Biology",
        "Physics",
        "Mathematics",
        "Psychology",
        "Economics",
        "Law",
        "Philosophy",
        "Other",
    ],
    default_field: "Computer Science",
    knowledge_levels: &[
        (KnowledgeLevel::Novice, "Novice"),
        (KnowledgeLevel::Intermediate, "Intermediate"),
        (KnowledgeLevel::Expert, "Expert"),
    ],
    analogy_styles: &[
        (
            AnalogyStyle::Tech,
            "Tech",
            "Use technology analogies (computers, networks, etc.)",
        ),
        (
            AnalogyStyle::Nature,
            "Nature",
            "Use nature-related analogies (ecosystems, animals, etc.)",
        ),
        (
            AnalogyStyle::Cooking,
            "Cooking",
            "Use culinary analogies (recipes, ingredients, etc.)",
        ),
        (
            AnalogyStyle::Sports,
            "Sports",
            "Use sports analogies (game rules, strategies, etc.)",
        ),
        (
            AnalogyStyle::PopCulture,
            "Pop Culture",
            "Use popular culture references (movies, series, etc.)",
        ),
    ],
};
