use super::types::{AnswerRecord, AnswerSource, FlagSource, QuestionMetadata, QuestionType};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// On-disk shape of a questionnaire submission.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SubmissionFile {
    #[serde(default)]
    values: Map<String, Value>,
    #[serde(default)]
    questions: Vec<QuestionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionEntry {
    name: String,
    #[serde(rename = "type")]
    question_type: QuestionType,
    page: PageRef,
    #[serde(default)]
    rate_min: Option<Value>,
    #[serde(default)]
    rate_max: Option<Value>,
}

/// Pages may be given by bare name or as `{ "name": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PageRef {
    Name(String),
    Page { name: String },
}

impl PageRef {
    fn into_name(self) -> String {
        match self {
            PageRef::Name(name) | PageRef::Page { name } => name,
        }
    }
}

/// A questionnaire submission: raw survey values plus question metadata.
///
/// Serves as both the [`FlagSource`] for section activation and the
/// [`AnswerSource`] for the accumulator.
#[derive(Debug, Clone, Default)]
pub struct SurveyDocument {
    values: Map<String, Value>,
    questions: IndexMap<String, QuestionMetadata>,
    include_unanswered: bool,
}

impl SurveyDocument {
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: SubmissionFile =
            serde_json::from_str(content).context("Failed to parse survey submission JSON")?;

        let questions = file
            .questions
            .into_iter()
            .map(|entry| {
                let metadata = QuestionMetadata {
                    question_type: entry.question_type,
                    page_name: entry.page.into_name(),
                    rate_min: entry.rate_min.as_ref().and_then(Value::as_f64),
                    rate_max: entry.rate_max.as_ref().and_then(Value::as_f64),
                };
                (entry.name, metadata)
            })
            .collect();

        Ok(Self {
            values: file.values,
            questions,
            include_unanswered: false,
        })
    }

    /// Emit every declared question, passing `null` for those left unanswered.
    pub fn with_unanswered(mut self, include: bool) -> Self {
        self.include_unanswered = include;
        self
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn add_question(&mut self, name: impl Into<String>, metadata: QuestionMetadata) {
        self.questions.insert(name.into(), metadata);
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

impl FlagSource for SurveyDocument {
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

impl AnswerSource for SurveyDocument {
    /// Records in question declaration order.
    fn answer_records(&self) -> Vec<AnswerRecord> {
        self.questions
            .keys()
            .filter_map(|name| match self.values.get(name) {
                Some(Value::Null) | None if !self.include_unanswered => None,
                Some(value) => Some(AnswerRecord {
                    name: name.clone(),
                    value: value.clone(),
                }),
                None => Some(AnswerRecord {
                    name: name.clone(),
                    value: Value::Null,
                }),
            })
            .collect()
    }

    fn question_metadata(&self, name: &str) -> Option<&QuestionMetadata> {
        self.questions.get(name)
    }
}

/// Load a survey submission from a JSON file.
pub fn load_survey_document(path: &Path) -> Result<SurveyDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read survey submission at {}", path.display()))?;

    SurveyDocument::from_json_str(&content)
        .with_context(|| format!("Invalid survey submission in {}", path.display()))
}
