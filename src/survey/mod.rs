pub mod document;
pub mod types;
pub mod value;

pub use document::{load_survey_document, SurveyDocument};
pub use types::{
    AnswerRecord, AnswerSource, AnsweredQuestion, FlagSource, QuestionMetadata, QuestionType,
};
pub use value::{parse_int_prefix, string_form};

use tracing::warn;

/// Join answer records with their question metadata.
///
/// Records whose question has no metadata cannot be routed and are dropped.
pub fn collect_answers<S: AnswerSource + ?Sized>(source: &S) -> Vec<AnsweredQuestion> {
    source
        .answer_records()
        .into_iter()
        .filter_map(|record| match source.question_metadata(&record.name) {
            Some(metadata) => Some(AnsweredQuestion::from_metadata(
                record.name,
                record.value,
                metadata,
            )),
            None => {
                warn!(question = %record.name, "answer has no question metadata, skipping");
                None
            }
        })
        .collect()
}
