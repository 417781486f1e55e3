use super::error::ScoringError;
use super::spec::QuestionRule;
use crate::survey::value::{is_number_equal, numeric_string, string_form};
use crate::survey::{AnsweredQuestion, QuestionType};
use serde::Serialize;

/// What one question adds to its section's running tally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleOutcome {
    pub score: f64,
    pub total: f64,
    /// Short human-readable reason, e.g. "matched 'agree' -> 100%"
    pub note: String,
}

impl RuleOutcome {
    fn new(score: f64, total: f64, note: impl Into<String>) -> Self {
        Self {
            score,
            total,
            note: note.into(),
        }
    }

    fn none(note: impl Into<String>) -> Self {
        Self::new(0.0, 0.0, note)
    }
}

/// Closed set of scoring policies, one per question kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Boolean,
    Rating,
    RadioGroup,
    Unscored,
}

impl From<&QuestionType> for QuestionKind {
    fn from(value: &QuestionType) -> Self {
        match value {
            QuestionType::Boolean => QuestionKind::Boolean,
            QuestionType::Rating => QuestionKind::Rating,
            QuestionType::RadioGroup => QuestionKind::RadioGroup,
            QuestionType::Other(_) => QuestionKind::Unscored,
        }
    }
}

impl QuestionKind {
    pub fn apply(
        &self,
        rule: &QuestionRule,
        answer: &AnsweredQuestion,
    ) -> Result<RuleOutcome, ScoringError> {
        match self {
            QuestionKind::Boolean => Ok(score_boolean(rule, answer)),
            QuestionKind::Rating => score_rating(rule, answer),
            QuestionKind::RadioGroup => Ok(score_radiogroup(rule, answer)),
            QuestionKind::Unscored => Ok(RuleOutcome::none(format!(
                "'{}' questions are not scored",
                answer.question_type
            ))),
        }
    }
}

/// Total always grows by `points`.
///
/// With a scoring table, full points only when the answer's string form
/// matches `correctAnswer` (a missing or falsy `correctAnswer` means no
/// points). Without a table, full points when the answer reads `"true"`.
pub fn score_boolean(rule: &QuestionRule, answer: &AnsweredQuestion) -> RuleOutcome {
    let points = rule.points;
    let given = string_form(&answer.value);

    match &rule.scoring {
        Some(table) => match table.correct_answer() {
            Some(expected) if string_form(expected) == given => {
                RuleOutcome::new(points, points, format!("'{}' is correct", given))
            }
            Some(expected) => RuleOutcome::new(
                0.0,
                points,
                format!("'{}' is not '{}'", given, string_form(expected)),
            ),
            None => RuleOutcome::new(0.0, points, "no correct answer configured"),
        },
        None if given == "true" => RuleOutcome::new(points, points, "answered true"),
        None => RuleOutcome::new(0.0, points, format!("answered '{}'", given)),
    }
}

/// Requires numeric `rateMin`/`rateMax` on the question, then grows total by
/// `points`.
///
/// Normal ranges award full points for an exact numeric `rateMax` and
/// `value / rateMax * points` for a numeric string. An `inverse` table awards
/// full points for an exact numeric `rateMin` and
/// `(rateMax - value) / rateMax * points + 1` for a numeric string. Any other
/// scoring table awards nothing.
pub fn score_rating(
    rule: &QuestionRule,
    answer: &AnsweredQuestion,
) -> Result<RuleOutcome, ScoringError> {
    let (rate_min, rate_max) = match (answer.rate_min, answer.rate_max) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            return Err(ScoringError::InvalidRatingRange {
                question: answer.name.clone(),
            })
        }
    };

    let points = rule.points;
    let value = &answer.value;

    let outcome = match &rule.scoring {
        Some(table) if table.is_inverse() => {
            if is_number_equal(value, rate_min) {
                RuleOutcome::new(points, points, format!("inverse, rated minimum {}", rate_min))
            } else if let Some(rated) = numeric_string(value) {
                // +1 applies even at rateMax.
                let score = ((rate_max - rated) / rate_max) * points + 1.0;
                RuleOutcome::new(
                    score,
                    points,
                    format!("inverse, rated {} of {}", rated, rate_max),
                )
            } else {
                RuleOutcome::new(0.0, points, "inverse, unrated")
            }
        }
        Some(_) => RuleOutcome::new(0.0, points, "scoring table without inverse flag"),
        None => {
            if is_number_equal(value, rate_max) {
                RuleOutcome::new(points, points, format!("rated maximum {}", rate_max))
            } else if let Some(rated) = numeric_string(value) {
                let score = (rated / rate_max) * points;
                RuleOutcome::new(score, points, format!("rated {} of {}", rated, rate_max))
            } else {
                RuleOutcome::new(0.0, points, "unrated")
            }
        }
    };

    Ok(outcome)
}

/// Only scored with a table: total grows by `points` and the answer earns
/// `points * pct / 100` when the table maps its label to a percentage in
/// `[0, 100]`.
pub fn score_radiogroup(rule: &QuestionRule, answer: &AnsweredQuestion) -> RuleOutcome {
    let Some(table) = &rule.scoring else {
        return RuleOutcome::none("no scoring table");
    };

    let points = rule.points;
    let label = string_form(&answer.value);

    match table.percent_for(&label) {
        Some(pct) => RuleOutcome::new(
            points * (pct / 100.0),
            points,
            format!("matched '{}' -> {}%", label, pct),
        ),
        None => RuleOutcome::new(0.0, points, format!("'{}' not in scoring table", label)),
    }
}
