use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use auditoria_core::models::template_item::TemplateItem;

use crate::error::ScoringError;
use crate::scoring::{max_score, score_for_answer};

/// One checklist item of an audit and the answer given to it, if any.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuditEntry {
    pub item: TemplateItem,
    #[serde(rename = "resposta", default)]
    pub answer: Option<String>,
}

/// Aggregated score of an audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuditScore {
    #[serde(rename = "pontuacaoObtida")]
    pub obtained: f64,
    #[serde(rename = "pontuacaoMaxima")]
    pub maximum: f64,
    /// `None` when nothing answered can score above zero.
    #[serde(rename = "percentual")]
    pub percentage: Option<f64>,
    #[serde(rename = "respondidos")]
    pub answered: usize,
    #[serde(rename = "pendentes")]
    pub pending: usize,
    /// How many items got each answer value.
    #[serde(rename = "porResposta")]
    pub by_answer: BTreeMap<String, usize>,
}

/// Parse a JSON array of audit entries.
pub fn parse_entries(raw: &str) -> Result<Vec<AuditEntry>, ScoringError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|e| ScoringError::InvalidEntry {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Sum scores over the answered items of an audit.
///
/// Only answered items contribute to the maximum, so a partially filled audit
/// reports how well it is going so far. Item weights are not applied.
pub fn summarize_audit(entries: &[AuditEntry]) -> AuditScore {
    let mut score = AuditScore {
        obtained: 0.0,
        maximum: 0.0,
        percentage: None,
        answered: 0,
        pending: 0,
        by_answer: BTreeMap::new(),
    };

    for entry in entries {
        let Some(answer) = entry.answer.as_deref().filter(|a| !a.is_empty()) else {
            score.pending += 1;
            continue;
        };

        score.answered += 1;
        score.obtained += score_for_answer(Some(&entry.item), answer);
        score.maximum += max_score(Some(&entry.item));
        *score.by_answer.entry(answer.to_string()).or_default() += 1;
    }

    if score.maximum > 0.0 {
        score.percentage = Some(score.obtained / score.maximum * 100.0);
    }

    tracing::debug!(
        answered = score.answered,
        pending = score.pending,
        obtained = score.obtained,
        maximum = score.maximum,
        "audit summarized"
    );

    score
}
