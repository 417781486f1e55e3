use std::path::PathBuf;
use thiserror::Error;

/// Fatal scoring failures. Any of these aborts the whole accumulation: a
/// malformed spec or question metadata must be fixed upstream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("section {section} does not exist in the scoring spec")]
    UnknownSection { section: String },

    #[error("question {question} for section {section} does not exist in the scoring spec")]
    UnknownQuestion { section: String, question: String },

    #[error("rateMin and rateMax must be numbers in the question metadata to score rating question {question}")]
    InvalidRatingRange { question: String },
}

/// Failures loading a scoring spec document.
#[derive(Debug, Error)]
pub enum SpecLoadError {
    #[error("failed to read scoring spec at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON scoring spec")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML scoring spec: {0}")]
    Yaml(String),
}
