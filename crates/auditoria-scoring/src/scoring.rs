use auditoria_core::models::template_item::{Pontuacao, TemplateItem};

/// Score of the first answer when the template does not configure one.
pub const DEFAULT_BASE_SCORE: f64 = 1.0;

/// Outcome of looking an answer up in the item's explicit configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreResolution {
    /// The template fixes the score for this answer.
    Explicit(f64),
    /// Nothing usable configured; use the sequential rule.
    Fallback,
}

/// Look `value` up in the item's answer configuration.
///
/// An explicit `null` resolves to zero. A missing entry, or an entry without a
/// numeric score, falls back.
pub fn lookup_explicit(item: &TemplateItem, value: &str) -> ScoreResolution {
    match item.config_for(value).map(|c| c.score) {
        Some(Pontuacao::Explicit(n)) => ScoreResolution::Explicit(n),
        Some(Pontuacao::ExplicitNull) => ScoreResolution::Explicit(0.0),
        Some(Pontuacao::Unset) | None => ScoreResolution::Fallback,
    }
}

/// Sequential rule: the first answer is worth `base`, each following answer
/// one point less. Answers outside the ordered set score zero.
///
/// `base` is the explicit numeric score of the first answer, or
/// [`DEFAULT_BASE_SCORE`].
pub fn sequential_score(item: &TemplateItem, value: &str) -> f64 {
    let answers = item.ordered_answers();
    let Some(index) = answers.iter().position(|a| *a == value) else {
        return 0.0;
    };

    let base = answers
        .first()
        .and_then(|first| item.config_for(first))
        .and_then(|c| c.score.as_number())
        .unwrap_or(DEFAULT_BASE_SCORE);

    base - index as f64
}

/// Points awarded for answering `item` with `value`.
///
/// Explicit configuration wins; otherwise the sequential rule applies. A
/// missing item scores zero.
pub fn score_for_answer(item: Option<&TemplateItem>, value: &str) -> f64 {
    let Some(item) = item else {
        return 0.0;
    };

    match lookup_explicit(item, value) {
        ScoreResolution::Explicit(score) => score,
        ScoreResolution::Fallback => sequential_score(item, value),
    }
}

/// Best score attainable on `item`.
///
/// Every answer is scored rather than assuming the first is best, because
/// explicit configs do not have to be monotonic.
pub fn max_score(item: Option<&TemplateItem>) -> f64 {
    let Some(item) = item else {
        return 0.0;
    };

    item.ordered_answers()
        .into_iter()
        .map(|value| score_for_answer(Some(item), value))
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// `count` scores starting at `first`, each one point below the previous.
///
/// Used to prefill a template's answer configuration with the sequential rule.
pub fn sequential_scores(first: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| first - i as f64).collect()
}
