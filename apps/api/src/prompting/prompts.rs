// Base instruction tables for every (locale, content kind) pair.
// The last row of each table is the "else" entry used by the fallback policy.

/// (analysis type label, base instruction)
pub type InstructionTable = &'static [(&'static str, &'static str)];

pub const EN_PDF_INSTRUCTIONS: InstructionTable = &[
    ("General summary", "Summarize this research paper concisely."),
    (
        "Detailed analogy",
        "Explain the main concepts of this paper using simple, familiar analogies.",
    ),
    (
        "Simplify concepts",
        "Simplify the complex concepts in this paper for a non-expert audience.",
    ),
    (
        "Key research points",
        "Identify and explain the main contributions and key findings of this research.",
    ),
];

pub const EN_YOUTUBE_INSTRUCTIONS: InstructionTable = &[
    (
        "Simple summary (3 sentences)",
        "Please summarize this video in 3 sentences.",
    ),
    (
        "Detailed analogy",
        "Explain the key concepts of this video using simple, familiar analogies.",
    ),
    ("Key points", "List and explain the 5 key points of this video."),
    (
        "Beginner explanation",
        "Explain the content of this video as if presenting to someone new to the topic.",
    ),
];

pub const FR_PDF_INSTRUCTIONS: InstructionTable = &[
    (
        "Résumé général",
        "Résume cet article de recherche de manière concise.",
    ),
    (
        "Analogie détaillée",
        "Explique les principaux concepts de cet article à l'aide d'analogies simples et familières.",
    ),
    (
        "Simplifier les concepts",
        "Simplifie les concepts complexes de cet article pour un public non spécialiste.",
    ),
    (
        "Points clés de la recherche",
        "Identifie et explique les principales contributions et les résultats clés de cette recherche.",
    ),
];

pub const FR_YOUTUBE_INSTRUCTIONS: InstructionTable = &[
    (
        "Résumé simple (3 phrases)",
        "Résume cette vidéo en 3 phrases.",
    ),
    (
        "Analogie détaillée",
        "Explique les concepts clés de cette vidéo à l'aide d'analogies simples et familières.",
    ),
    (
        "Points clés",
        "Liste et explique les 5 points clés de cette vidéo.",
    ),
    (
        "Explication pour débutant",
        "Explique le contenu de cette vidéo comme si tu le présentais à quelqu'un qui découvre le sujet.",
    ),
];
