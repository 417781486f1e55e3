pub mod engine;
pub mod error;
pub mod rules;
pub mod spec;
pub mod validation;

pub use engine::{
    calculate_scores, calculate_scores_with_breakdown, QuestionContribution, ScoreBreakdown,
    ScoringResult, SectionScore,
};
pub use error::{ScoringError, SpecLoadError};
pub use rules::{QuestionKind, RuleOutcome};
pub use spec::{load_scoring_spec, QuestionRule, ScoringSpec, ScoringTable, SectionSpec};
pub use validation::validate_scoring_spec;
