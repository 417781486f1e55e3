use super::spec::{ScoringSpec, CORRECT_ANSWER_KEY, INVERSE_KEY};
use crate::sections::SectionCatalog;
use serde_json::Value;

/// Validate a scoring spec at startup.
/// Returns all validation errors at once (not just the first).
///
/// This only flags entries the engine would silently ignore or that point at
/// a misconfiguration; scoring itself stays strict about missing sections and
/// questions regardless.
pub fn validate_scoring_spec(
    spec: &ScoringSpec,
    catalog: &SectionCatalog,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Every declared section needs rules once it is enabled
    for decl in catalog.iter() {
        if spec.section(&decl.name).is_none() {
            errors.push(format!(
                "sections.{}: missing from scoring spec (declared as '{}')",
                decl.name, decl.id
            ));
        }
    }

    for (section_name, section) in &spec.sections {
        for (question_name, rule) in &section.questions {
            let path = format!("sections.{}.questions.{}", section_name, question_name);

            if !rule.points.is_finite() || rule.points < 0.0 {
                errors.push(format!(
                    "{}.points: must be a non-negative number, got {}",
                    path, rule.points
                ));
            }

            let Some(ref table) = rule.scoring else {
                continue;
            };

            for (key, value) in table.iter() {
                match key {
                    CORRECT_ANSWER_KEY => {}
                    INVERSE_KEY => {
                        if !value.is_boolean() {
                            errors.push(format!(
                                "{}.scoring.inverse: must be a boolean, got {}",
                                path, value
                            ));
                        }
                    }
                    label => {
                        if !is_percentage(value) {
                            errors.push(format!(
                                "{}.scoring.{}: must be a percentage in [0, 100], got {}",
                                path, label, value
                            ));
                        }
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_percentage(value: &Value) -> bool {
    value
        .as_f64()
        .is_some_and(|pct| (0.0..=100.0).contains(&pct))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::spec::{QuestionRule, ScoringTable, SectionSpec};
    use serde_json::json;

    fn spec_with(section: &str, question: &str, rule: QuestionRule) -> ScoringSpec {
        let mut section_spec = SectionSpec::default();
        section_spec.questions.insert(question.to_string(), rule);
        let mut spec = ScoringSpec::default();
        spec.sections.insert(section.to_string(), section_spec);
        spec
    }

    fn one_section() -> SectionCatalog {
        SectionCatalog::new(["one"])
    }

    #[test]
    fn test_valid_spec() {
        let rule = QuestionRule::new(20.0).with_scoring(
            ScoringTable::new()
                .with_entry("agree", json!(100))
                .with_entry("neutral", json!(50)),
        );
        let spec = spec_with("sectionOne", "q1", rule);
        assert!(validate_scoring_spec(&spec, &one_section()).is_ok());
    }

    #[test]
    fn test_correct_answer_and_inverse_entries_accepted() {
        let rule = QuestionRule::new(5.0).with_scoring(
            ScoringTable::new()
                .with_entry("correctAnswer", json!("yes"))
                .with_entry("inverse", json!(false)),
        );
        let spec = spec_with("sectionOne", "q1", rule);
        assert!(validate_scoring_spec(&spec, &one_section()).is_ok());
    }

    #[test]
    fn test_missing_catalog_section() {
        let spec = spec_with("sectionOne", "q1", QuestionRule::new(1.0));
        let catalog = SectionCatalog::new(["one", "two"]);

        let errors = validate_scoring_spec(&spec, &catalog).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("sections.sectionTwo"));
    }

    #[test]
    fn test_negative_points() {
        let spec = spec_with("sectionOne", "q1", QuestionRule::new(-5.0));
        let errors = validate_scoring_spec(&spec, &one_section()).unwrap_err();
        assert!(errors[0].contains("sections.sectionOne.questions.q1.points"));
    }

    #[test]
    fn test_non_finite_points() {
        let spec = spec_with("sectionOne", "q1", QuestionRule::new(f64::NAN));
        assert!(validate_scoring_spec(&spec, &one_section()).is_err());
    }

    #[test]
    fn test_out_of_range_percentage() {
        let rule =
            QuestionRule::new(10.0).with_scoring(ScoringTable::new().with_entry("bonus", json!(150)));
        let spec = spec_with("sectionOne", "q1", rule);
        let errors = validate_scoring_spec(&spec, &one_section()).unwrap_err();
        assert!(errors[0].contains("scoring.bonus"));
    }

    #[test]
    fn test_non_numeric_percentage() {
        let rule =
            QuestionRule::new(10.0).with_scoring(ScoringTable::new().with_entry("agree", json!("100")));
        let spec = spec_with("sectionOne", "q1", rule);
        assert!(validate_scoring_spec(&spec, &one_section()).is_err());
    }

    #[test]
    fn test_non_boolean_inverse() {
        let rule =
            QuestionRule::new(10.0).with_scoring(ScoringTable::new().with_entry("inverse", json!("true")));
        let spec = spec_with("sectionOne", "q1", rule);
        let errors = validate_scoring_spec(&spec, &one_section()).unwrap_err();
        assert!(errors[0].contains("scoring.inverse"));
    }

    #[test]
    fn test_collects_all_errors() {
        let rule = QuestionRule::new(-1.0) // Error 1
            .with_scoring(ScoringTable::new().with_entry("agree", json!(500))); // Error 2
        let spec = spec_with("sectionOne", "q1", rule);
        let catalog = SectionCatalog::new(["one", "two"]); // Error 3

        let errors = validate_scoring_spec(&spec, &catalog).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
