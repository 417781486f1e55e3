use super::error::ScoringError;
use super::rules::QuestionKind;
use super::spec::ScoringSpec;
use crate::sections::SectionFlags;
use crate::survey::AnsweredQuestion;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Running score and maximum achievable points for one section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub score: f64,
    pub total: f64,
}

impl SectionScore {
    /// Score as a percentage of total, `None` while nothing has accrued.
    pub fn percentage(&self) -> Option<f64> {
        if self.total == 0.0 {
            None
        } else {
            Some(self.score / self.total * 100.0)
        }
    }
}

/// Per-section tallies for exactly the sections enabled at computation time,
/// in section declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringResult {
    sections: IndexMap<String, SectionScore>,
}

impl ScoringResult {
    fn initialized(flags: &SectionFlags) -> Self {
        Self {
            sections: flags
                .enabled_sections()
                .map(|name| (name.to_string(), SectionScore::default()))
                .collect(),
        }
    }

    pub fn get(&self, section: &str) -> Option<&SectionScore> {
        self.sections.get(section)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionScore)> {
        self.sections.iter().map(|(name, score)| (name.as_str(), score))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// One question's effect on its section, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionContribution {
    pub section: String,
    pub question: String,
    pub kind: QuestionKind,
    pub score_delta: f64,
    pub total_delta: f64,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub result: ScoringResult,
    pub contributions: Vec<QuestionContribution>,
}

/// Score answered questions against the spec for every enabled section.
///
/// Answers are routed to a section by page-name prefix. Answers whose page
/// matches no enabled section are skipped. An enabled section or question
/// missing from the spec, or a rating question without a numeric range,
/// aborts the whole computation.
pub fn calculate_scores(
    flags: &SectionFlags,
    spec: &ScoringSpec,
    answers: &[AnsweredQuestion],
) -> Result<ScoringResult, ScoringError> {
    accumulate(flags, spec, answers, None)
}

/// Same as [`calculate_scores`], also returning the per-question trail.
pub fn calculate_scores_with_breakdown(
    flags: &SectionFlags,
    spec: &ScoringSpec,
    answers: &[AnsweredQuestion],
) -> Result<ScoreBreakdown, ScoringError> {
    let mut contributions = Vec::new();
    let result = accumulate(flags, spec, answers, Some(&mut contributions))?;
    Ok(ScoreBreakdown {
        result,
        contributions,
    })
}

fn accumulate(
    flags: &SectionFlags,
    spec: &ScoringSpec,
    answers: &[AnsweredQuestion],
    mut trail: Option<&mut Vec<QuestionContribution>>,
) -> Result<ScoringResult, ScoringError> {
    let mut result = ScoringResult::initialized(flags);

    if answers.is_empty() {
        return Ok(result);
    }

    for answer in answers {
        let Some(section_name) = flags.route(&answer.page_name) else {
            debug!(
                question = %answer.name,
                page = %answer.page_name,
                "no enabled section for page, skipping"
            );
            continue;
        };

        let section = spec
            .section(section_name)
            .ok_or_else(|| ScoringError::UnknownSection {
                section: section_name.to_string(),
            })?;

        let rule = section
            .question(&answer.name)
            .ok_or_else(|| ScoringError::UnknownQuestion {
                section: section_name.to_string(),
                question: answer.name.clone(),
            })?;

        let kind = QuestionKind::from(&answer.question_type);
        let outcome = kind.apply(rule, answer)?;

        if let Some(tally) = result.sections.get_mut(section_name) {
            tally.score += outcome.score;
            tally.total += outcome.total;
        }

        trace!(
            section = section_name,
            question = %answer.name,
            score = outcome.score,
            total = outcome.total,
            note = %outcome.note,
            "applied question"
        );

        if let Some(trail) = trail.as_deref_mut() {
            trail.push(QuestionContribution {
                section: section_name.to_string(),
                question: answer.name.clone(),
                kind,
                score_delta: outcome.score,
                total_delta: outcome.total,
                note: outcome.note,
            });
        }
    }

    Ok(result)
}
