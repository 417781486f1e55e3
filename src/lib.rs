//! Section-based questionnaire scoring.
//!
//! Raw survey values resolve to enabled sections ([`sections`]), answered
//! questions are routed to those sections by page name ([`survey`]), and the
//! accumulator in [`scoring`] applies per-question-type rules from a
//! declarative scoring spec.

pub mod config;
pub mod output;
pub mod scoring;
pub mod sections;
pub mod survey;
pub mod telemetry;

pub use scoring::{calculate_scores, ScoringError, ScoringResult, ScoringSpec, SectionScore};
pub use sections::{resolve_section_flags, SectionCatalog, SectionFlags};
pub use survey::{collect_answers, AnsweredQuestion, SurveyDocument};
