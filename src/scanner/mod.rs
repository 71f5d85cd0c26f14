//! Trademark watch over bulletin text.
//!
//! Given the text of a Boletín de Marcas (already extracted from the PDF) and the
//! marks a user owns, [`scan_bulletin`] lists the newly published denominative
//! marks that look or sound like one of them.

mod entries;
mod similarity;

pub use entries::{extract_marca_entries, UNNAMED_MIXED_MARK};
pub use similarity::{dice_similarity, phonetic_similarity, PHONETIC_MATCH_SCORE};

use crate::utils::to_percent;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Best scores at or below this are not reported.
const RELEVANCE_THRESHOLD: f64 = 0.2;
/// Results above this percentage count as matches in the summary.
const MATCH_PERCENT_THRESHOLD: u32 = 30;

const MIXED_MARKS_NOTICE: &str = "El análisis de marcas mixtas no está disponible: el INPI no publica sus elementos figurativos en un formato procesable.";

/// INID (40) mark type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkKind {
    #[serde(rename = "D")]
    Denominative,
    #[serde(rename = "M")]
    Mixed,
}

impl MarkKind {
    fn from_code(code: &str) -> Self {
        match code {
            "M" => Self::Mixed,
            _ => Self::Denominative,
        }
    }
}

/// A trademark application published in the bulletin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarcaEntry {
    #[serde(rename = "tipo")]
    pub kind: MarkKind,
    pub marca: String,
    pub clase: Option<String>,
    pub solicitante: Option<String>,
    pub numero: Option<String>,
}

/// Which comparison produced the best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityKind {
    Fonetica,
    Visual,
    Ambos,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub marca: String,
    pub clase: Option<String>,
    pub solicitante: Option<String>,
    pub numero: Option<String>,
    /// Best score as a whole percentage
    pub similitud: u32,
    pub sugerencias: Vec<String>,
    pub tipo_similitud: SimilarityKind,
    /// The user's mark closest to this entry
    pub user_marca: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenominativeSummary {
    pub count: usize,
    pub matches: usize,
    pub results: Vec<AnalysisResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixedSummary {
    pub count: usize,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub denominativas: DenominativeSummary,
    pub mixtas: MixedSummary,
}

/// Compares denominative entries against the user's marks.
///
/// For each entry the best-scoring user mark wins (first one on ties), scored as
/// the larger of [`dice_similarity`] and [`phonetic_similarity`]. Entries whose
/// best score does not exceed 0.2 are dropped. Results are ordered by
/// similarity, highest first.
pub fn analyze_marcas(entries: &[MarcaEntry], user_marcas: &[String]) -> Vec<AnalysisResult> {
    let user_marcas: Vec<String> = user_marcas
        .iter()
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .collect();

    let mut results: Vec<AnalysisResult> = entries
        .iter()
        .filter(|entry| entry.kind == MarkKind::Denominative)
        .filter_map(|entry| {
            let marca_text = entry.marca.trim().to_lowercase();
            let mut best = 0.0_f64;
            let mut best_marca = "";
            let mut kind = SimilarityKind::Visual;

            for user_marca in &user_marcas {
                let visual = dice_similarity(&marca_text, user_marca);
                let phonetic = phonetic_similarity(&marca_text, user_marca);
                let total = visual.max(phonetic);

                if total > best {
                    best = total;
                    best_marca = user_marca.as_str();
                    kind = if visual > phonetic {
                        SimilarityKind::Visual
                    } else if phonetic > visual {
                        SimilarityKind::Fonetica
                    } else {
                        SimilarityKind::Ambos
                    };
                }
            }

            (best > RELEVANCE_THRESHOLD).then(|| AnalysisResult {
                marca: entry.marca.clone(),
                clase: entry.clase.clone(),
                solicitante: entry.solicitante.clone(),
                numero: entry.numero.clone(),
                similitud: to_percent(best),
                sugerencias: suggestions(&marca_text, best_marca, best),
                tipo_similitud: kind,
                user_marca: best_marca.to_string(),
            })
        })
        .collect();

    results.sort_by(|a, b| b.similitud.cmp(&a.similitud));
    results
}

/// Extracts the entries from `text` and analyzes them against `user_marcas`.
pub fn scan_bulletin(text: &str, user_marcas: &[String]) -> ScanReport {
    let entries = extract_marca_entries(text);
    let denominative = entries
        .iter()
        .filter(|e| e.kind == MarkKind::Denominative)
        .count();
    let mixed = entries.len() - denominative;
    debug!(denominative, mixed, "Extracted bulletin entries");

    let results = analyze_marcas(&entries, user_marcas);
    let matches = results
        .iter()
        .filter(|r| r.similitud > MATCH_PERCENT_THRESHOLD)
        .count();

    ScanReport {
        denominativas: DenominativeSummary {
            count: denominative,
            matches,
            results,
        },
        mixtas: MixedSummary {
            count: mixed,
            message: MIXED_MARKS_NOTICE,
        },
    }
}

fn suggestions(marca_text: &str, user_marca: &str, score: f64) -> Vec<String> {
    let mut out = Vec::new();

    if score > 0.8 {
        out.push("Alta similitud - Revisión urgente recomendada".to_string());
    } else if score > 0.6 {
        out.push("Similitud moderada - Considerar oposición".to_string());
    } else if score > 0.4 {
        out.push("Similitud baja - Monitorear desarrollo".to_string());
    }

    if marca_text.contains(user_marca) || user_marca.contains(marca_text) {
        out.push("Contención de términos detectada".to_string());
    }

    out
}
