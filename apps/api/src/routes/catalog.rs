use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::models::analysis::ContentKind;
use crate::models::profile::{AnalogyStyle, KnowledgeLevel};
use crate::prompting::compiler::analysis_types;
use crate::prompting::UnknownAnalysisPolicy;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub locale: Option<Locale>,
}

#[derive(Serialize)]
pub struct LevelOption {
    pub value: KnowledgeLevel,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct StyleOption {
    pub value: AnalogyStyle,
    pub label: &'static str,
    pub description: &'static str,
}

/// Everything a client needs to render the profile form and the analysis
/// type selectors.
#[derive(Serialize)]
pub struct Catalog {
    pub locale: Locale,
    pub locales: [Locale; 2],
    pub fields: &'static [&'static str],
    pub default_field: &'static str,
    pub knowledge_levels: Vec<LevelOption>,
    pub analogy_styles: Vec<StyleOption>,
    pub analysis_types: BTreeMap<&'static str, Vec<&'static str>>,
    pub unknown_analysis_policy: UnknownAnalysisPolicy,
}

pub fn build_catalog(locale: Locale, policy: UnknownAnalysisPolicy) -> Catalog {
    let vocabulary = locale.vocabulary();

    let mut types = BTreeMap::new();
    types.insert("youtube", analysis_types(locale, ContentKind::YouTube));
    types.insert("pdf", analysis_types(locale, ContentKind::Pdf));

    Catalog {
        locale,
        locales: Locale::ALL,
        fields: vocabulary.fields,
        default_field: vocabulary.default_field,
        knowledge_levels: KnowledgeLevel::ALL
            .into_iter()
            .map(|value| LevelOption {
                value,
                label: locale.knowledge_label(value),
            })
            .collect(),
        analogy_styles: AnalogyStyle::ALL
            .into_iter()
            .map(|value| StyleOption {
                value,
                label: locale.analogy_label(value),
                description: locale.analogy_description(value),
            })
            .collect(),
        analysis_types: types,
        unknown_analysis_policy: policy,
    }
}

/// GET /api/v1/catalog?locale=
pub async fn handle_catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<Catalog> {
    let locale = query.locale.unwrap_or(state.config.default_locale);
    Json(build_catalog(locale, state.compiler.policy()))
}
