use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Question kinds the scoring engine distinguishes.
///
/// Anything the questionnaire runtime reports that is not one of the three
/// scored kinds is kept verbatim in `Other` and contributes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    Boolean,
    Rating,
    RadioGroup,
    Other(String),
}

impl From<String> for QuestionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "boolean" => QuestionType::Boolean,
            "rating" => QuestionType::Rating,
            "radiogroup" => QuestionType::RadioGroup,
            _ => QuestionType::Other(value),
        }
    }
}

impl From<&str> for QuestionType {
    fn from(value: &str) -> Self {
        QuestionType::from(value.to_string())
    }
}

impl From<QuestionType> for String {
    fn from(value: QuestionType) -> Self {
        value.as_str().to_string()
    }
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::Boolean => "boolean",
            QuestionType::Rating => "rating",
            QuestionType::RadioGroup => "radiogroup",
            QuestionType::Other(name) => name,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-question metadata as declared by the questionnaire.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionMetadata {
    pub question_type: QuestionType,
    /// Name of the page the question sits on (e.g. `sectionOnePanel1`)
    pub page_name: String,
    pub rate_min: Option<f64>,
    pub rate_max: Option<f64>,
}

/// One answered question, ready for the accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct AnsweredQuestion {
    pub name: String,
    pub value: Value,
    pub question_type: QuestionType,
    /// Page name used to route the answer to a section by prefix
    pub page_name: String,
    pub rate_min: Option<f64>,
    pub rate_max: Option<f64>,
}

impl AnsweredQuestion {
    pub fn from_metadata(name: impl Into<String>, value: Value, metadata: &QuestionMetadata) -> Self {
        Self {
            name: name.into(),
            value,
            question_type: metadata.question_type.clone(),
            page_name: metadata.page_name.clone(),
            rate_min: metadata.rate_min,
            rate_max: metadata.rate_max,
        }
    }
}

/// A raw `{ name, value }` record as reported by the questionnaire.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    pub name: String,
    pub value: Value,
}

/// Source of raw survey-level values (section enablement flags among them).
pub trait FlagSource {
    /// Raw value stored under `key`, `None` when the survey never set it.
    fn get_value(&self, key: &str) -> Option<&Value>;
}

/// Source of answers for one questionnaire submission.
pub trait AnswerSource {
    fn answer_records(&self) -> Vec<AnswerRecord>;

    fn question_metadata(&self, name: &str) -> Option<&QuestionMetadata>;
}
