//! Checks and helpers for template authors.
//!
//! The sequential rule takes its base from the first answer and counts down,
//! so it silently treats the first answer as the most favourable. Nothing in
//! the template model enforces that; these warnings surface it in the editor
//! instead.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use auditoria_core::models::template_item::{AnswerOptionConfig, Pontuacao, TemplateItem};

use crate::scoring::{score_for_answer, sequential_scores};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum AuthoringWarning {
    /// Another answer outscores the first one.
    FirstAnswerNotBest {
        first: String,
        first_score: f64,
        best: String,
        best_score: f64,
    },
    /// More than one config entry for the same answer; only the first counts.
    DuplicateConfig { value: String },
    /// Config entry for an answer the item does not offer.
    OrphanConfig { value: String },
}

pub fn authoring_warnings(item: &TemplateItem) -> Vec<AuthoringWarning> {
    let answers = item.ordered_answers();
    let mut warnings = Vec::new();

    if let Some(first) = answers.first() {
        let first_score = score_for_answer(Some(item), first);
        let best = answers
            .iter()
            .map(|a| (*a, score_for_answer(Some(item), a)))
            .fold(None::<(&str, f64)>, |best, (a, s)| match best {
                Some((_, bs)) if bs >= s => best,
                _ => Some((a, s)),
            });

        if let Some((best, best_score)) = best
            && best_score > first_score
        {
            warnings.push(AuthoringWarning::FirstAnswerNotBest {
                first: first.to_string(),
                first_score,
                best: best.to_string(),
                best_score,
            });
        }
    }

    let mut seen: Vec<&str> = Vec::new();
    for config in &item.answer_config {
        let value = config.value.as_str();
        if seen.contains(&value) {
            if !warnings
                .iter()
                .any(|w| matches!(w, AuthoringWarning::DuplicateConfig { value: v } if v == value))
            {
                warnings.push(AuthoringWarning::DuplicateConfig {
                    value: value.to_string(),
                });
            }
            continue;
        }
        seen.push(value);

        if !answers.contains(&value) {
            warnings.push(AuthoringWarning::OrphanConfig {
                value: value.to_string(),
            });
        }
    }

    warnings
}

/// Config entries for every answer of `item`, scored `first, first - 1, ...`.
///
/// Photo and observation flags already set on an answer are kept.
pub fn prefill_sequential_config(item: &TemplateItem, first: f64) -> Vec<AnswerOptionConfig> {
    let answers = item.ordered_answers();
    let scores = sequential_scores(first, answers.len());

    answers
        .into_iter()
        .zip(scores)
        .map(|(value, score)| {
            let mut entry = item
                .config_for(value)
                .cloned()
                .unwrap_or_else(|| AnswerOptionConfig::new(value));
            entry.score = Pontuacao::Explicit(score);
            entry
        })
        .collect()
}
