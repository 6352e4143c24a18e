use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::CoreError;

/// Answer values offered when a template item does not define its own list.
/// Order matters: the sequential scoring rule counts down from the first.
pub const DEFAULT_ANSWERS: [&str; 4] = ["conforme", "nao_conforme", "nao_aplicavel", "nao_avaliado"];

/// The score configured for one answer value.
///
/// The API layer sends three distinct shapes for `pontuacao`: the key is
/// missing, the key is `null`, or the key holds a number. They mean different
/// things, so they are kept apart here instead of collapsing into `Option`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Pontuacao {
    /// No usable score configured. Scoring falls back to the sequential rule.
    #[default]
    Unset,
    /// Explicit `null`: the answer is worth zero points.
    ExplicitNull,
    /// Explicit score, wins over the sequential rule.
    Explicit(f64),
}

impl Pontuacao {
    pub fn is_unset(&self) -> bool {
        matches!(self, Pontuacao::Unset)
    }

    /// The configured number, if one was given.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Pontuacao::Explicit(n) => Some(*n),
            _ => None,
        }
    }
}

impl Serialize for Pontuacao {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Pontuacao::Explicit(n) => serializer.serialize_f64(*n),
            // Unset is skipped at the field level; if it ever reaches here it
            // is written as null like an explicit zero.
            Pontuacao::Unset | Pontuacao::ExplicitNull => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Pontuacao {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Older templates stored strings or booleans here; those carry no score.
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Null => Pontuacao::ExplicitNull,
            serde_json::Value::Number(n) => n.as_f64().map_or(Pontuacao::Unset, Pontuacao::Explicit),
            _ => Pontuacao::Unset,
        })
    }
}

/// Per-answer configuration inside a template item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOptionConfig {
    #[serde(rename = "valor")]
    pub value: String,
    #[serde(rename = "pontuacao", default, skip_serializing_if = "Pontuacao::is_unset")]
    #[ts(type = "number | null")]
    pub score: Pontuacao,
    #[serde(rename = "fotoObrigatoria", default)]
    pub photo_required: bool,
    #[serde(rename = "observacaoObrigatoria", default)]
    pub observation_required: bool,
}

impl AnswerOptionConfig {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            score: Pontuacao::Unset,
            photo_required: false,
            observation_required: false,
        }
    }

    pub fn with_score(mut self, score: Pontuacao) -> Self {
        self.score = score;
        self
    }
}

/// A single checklist question inside an audit template.
///
/// Authored by a manager; read-only while an audit is running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TemplateItem {
    #[serde(rename = "opcoesRespostaConfig", default)]
    pub answer_config: Vec<AnswerOptionConfig>,
    #[serde(rename = "opcoesResposta", default, skip_serializing_if = "Option::is_none")]
    pub custom_answers: Option<Vec<String>>,
    #[serde(rename = "usarRespostasPersonalizadas", default)]
    pub use_custom_answers: bool,
    /// Not used by scoring.
    #[serde(rename = "peso", default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Default for TemplateItem {
    fn default() -> Self {
        Self {
            answer_config: Vec::new(),
            custom_answers: None,
            use_custom_answers: false,
            weight: default_weight(),
        }
    }
}

impl TemplateItem {
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// First config entry for `value`. Later duplicates are ignored.
    pub fn config_for(&self, value: &str) -> Option<&AnswerOptionConfig> {
        self.answer_config.iter().find(|c| c.value == value)
    }

    /// The answer values an auditor may pick, in scoring order.
    ///
    /// The custom list only applies when the flag is on and the list is
    /// non-empty; anything else falls back to [`DEFAULT_ANSWERS`].
    pub fn ordered_answers(&self) -> Vec<&str> {
        match &self.custom_answers {
            Some(custom) if self.use_custom_answers && !custom.is_empty() => {
                custom.iter().map(String::as_str).collect()
            }
            _ => DEFAULT_ANSWERS.to_vec(),
        }
    }
}
