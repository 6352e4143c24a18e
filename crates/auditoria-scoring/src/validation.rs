use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use auditoria_core::models::template_item::TemplateItem;

/// What an auditor submitted for one checklist item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerSubmission {
    #[serde(rename = "resposta")]
    pub value: String,
    #[serde(rename = "observacao", default)]
    pub observation: Option<String>,
    #[serde(rename = "quantidadeFotos", default)]
    pub photo_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ViolationKind {
    UnknownAnswer,
    PhotoRequired,
    ObservationRequired,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct AnswerViolation {
    pub kind: ViolationKind,
    pub value: String,
    pub message: String,
}

/// Check a submission against the item's allowed answers and the photo /
/// observation requirements configured for the chosen answer.
pub fn validate_answer(item: &TemplateItem, submission: &AnswerSubmission) -> Vec<AnswerViolation> {
    let value = submission.value.as_str();
    let mut violations = Vec::new();

    if !item.ordered_answers().contains(&value) {
        violations.push(AnswerViolation {
            kind: ViolationKind::UnknownAnswer,
            value: value.to_string(),
            message: format!("'{value}' is not an allowed answer for this item"),
        });
        return violations;
    }

    let Some(config) = item.config_for(value) else {
        return violations;
    };

    if config.photo_required && submission.photo_count == 0 {
        violations.push(AnswerViolation {
            kind: ViolationKind::PhotoRequired,
            value: value.to_string(),
            message: format!("answer '{value}' requires at least one photo"),
        });
    }

    let has_observation = submission
        .observation
        .as_deref()
        .is_some_and(|o| !o.trim().is_empty());
    if config.observation_required && !has_observation {
        violations.push(AnswerViolation {
            kind: ViolationKind::ObservationRequired,
            value: value.to_string(),
            message: format!("answer '{value}' requires an observation"),
        });
    }

    violations
}
