use super::error::SpecLoadError;
use crate::survey::value::is_truthy;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Key of the boolean "correct answer" entry in a scoring table.
pub const CORRECT_ANSWER_KEY: &str = "correctAnswer";
/// Key of the rating "inverse range" flag in a scoring table.
pub const INVERSE_KEY: &str = "inverse";

/// Declarative scoring specification.
///
/// Example JSON:
/// ```json
/// {
///   "sections": {
///     "sectionOne": {
///       "questions": {
///         "hasPolicy": { "points": 10 },
///         "policyAge": { "points": 5, "scoring": { "inverse": true } },
///         "maturity": { "points": 20, "scoring": { "high": 100, "medium": 50 } }
///       }
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringSpec {
    #[serde(default)]
    pub sections: IndexMap<String, SectionSpec>,
}

/// Scoring rules for the questions of one section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct SectionSpec {
    #[serde(default)]
    pub questions: IndexMap<String, QuestionRule>,
}

/// Points for one question and an optional partial-credit table.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct QuestionRule {
    pub points: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringTable>,
}

impl QuestionRule {
    pub fn new(points: f64) -> Self {
        Self {
            points,
            scoring: None,
        }
    }

    pub fn with_scoring(mut self, table: ScoringTable) -> Self {
        self.scoring = Some(table);
        self
    }
}

/// Partial-credit table. Its meaning depends on the question kind:
/// `correctAnswer` for boolean, `inverse` for rating, and answer label to
/// percentage for radiogroup.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ScoringTable {
    entries: IndexMap<String, Value>,
}

impl ScoringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.entries.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The expected boolean answer. Falsy entries (`null`, `false`, `0`,
    /// `""`) count as unset.
    pub fn correct_answer(&self) -> Option<&Value> {
        self.entries
            .get(CORRECT_ANSWER_KEY)
            .filter(|value| is_truthy(value))
    }

    /// Only a literal `true` flips a rating range.
    pub fn is_inverse(&self) -> bool {
        matches!(self.entries.get(INVERSE_KEY), Some(Value::Bool(true)))
    }

    /// Percentage credited for an answer label, if it is a number in `[0, 100]`.
    pub fn percent_for(&self, label: &str) -> Option<f64> {
        self.entries
            .get(label)
            .and_then(Value::as_f64)
            .filter(|pct| (0.0..=100.0).contains(pct))
    }
}

impl ScoringSpec {
    pub fn from_json_str(content: &str) -> Result<Self, SpecLoadError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, SpecLoadError> {
        serde_saphyr::from_str(content).map_err(|e| SpecLoadError::Yaml(e.to_string()))
    }

    pub fn section(&self, name: &str) -> Option<&SectionSpec> {
        self.sections.get(name)
    }

    pub fn question_count(&self) -> usize {
        self.sections.values().map(|s| s.questions.len()).sum()
    }
}

impl SectionSpec {
    pub fn question(&self, name: &str) -> Option<&QuestionRule> {
        self.questions.get(name)
    }
}

/// Load a scoring spec, parsing `.yaml`/`.yml` files as YAML and anything
/// else as JSON.
pub fn load_scoring_spec(path: &Path) -> Result<ScoringSpec, SpecLoadError> {
    let content = fs::read_to_string(path).map_err(|source| SpecLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let spec = if is_yaml {
        ScoringSpec::from_yaml_str(&content)?
    } else {
        ScoringSpec::from_json_str(&content)?
    };

    debug!(
        path = %path.display(),
        sections = spec.sections.len(),
        questions = spec.question_count(),
        "loaded scoring spec"
    );

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::env;

    const SPEC_JSON: &str = r#"{
        "sections": {
            "sectionOne": {
                "questions": {
                    "q1": { "points": 10 },
                    "q2": { "points": 5, "scoring": { "correctAnswer": "yes" } }
                }
            },
            "sectionTwo": {
                "questions": {
                    "r1": { "points": 20, "scoring": { "agree": 100, "neutral": 50 } }
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_json_spec() {
        let spec = ScoringSpec::from_json_str(SPEC_JSON).unwrap();
        assert_eq!(spec.sections.len(), 2);
        assert_eq!(spec.question_count(), 3);

        let q1 = spec.section("sectionOne").unwrap().question("q1").unwrap();
        assert_eq!(q1.points, 10.0);
        assert!(q1.scoring.is_none());

        let q2 = spec.section("sectionOne").unwrap().question("q2").unwrap();
        assert_eq!(
            q2.scoring.as_ref().unwrap().correct_answer(),
            Some(&json!("yes"))
        );
    }

    #[test]
    fn test_sections_keep_document_order() {
        let spec = ScoringSpec::from_json_str(SPEC_JSON).unwrap();
        let names: Vec<_> = spec.sections.keys().collect();
        assert_eq!(names, vec!["sectionOne", "sectionTwo"]);
    }

    #[test]
    fn test_parse_yaml_spec() {
        let yaml = r#"
sections:
  sectionOne:
    questions:
      q1:
        points: 10
      r1:
        points: 4
        scoring:
          inverse: true
"#;
        let spec = ScoringSpec::from_yaml_str(yaml).unwrap();
        let section = spec.section("sectionOne").unwrap();
        assert_eq!(section.question("q1").unwrap().points, 10.0);
        assert!(section
            .question("r1")
            .unwrap()
            .scoring
            .as_ref()
            .unwrap()
            .is_inverse());
    }

    #[test]
    fn test_rejects_unknown_top_level_field() {
        let result = ScoringSpec::from_json_str(r#"{ "sections": {}, "version": 2 }"#);
        assert!(matches!(result, Err(SpecLoadError::Json(_))));
    }

    #[test]
    fn test_missing_points_is_an_error() {
        let result = ScoringSpec::from_json_str(
            r#"{ "sections": { "sectionOne": { "questions": { "q1": {} } } } }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_falsy_correct_answer_is_unset() {
        for falsy in [Value::Null, json!(false), json!(0), json!("")] {
            let table = ScoringTable::new().with_entry(CORRECT_ANSWER_KEY, falsy);
            assert!(table.correct_answer().is_none());
        }

        let table = ScoringTable::new().with_entry(CORRECT_ANSWER_KEY, json!("false"));
        assert_eq!(table.correct_answer(), Some(&json!("false")));
    }

    #[test]
    fn test_is_inverse_requires_literal_true() {
        assert!(ScoringTable::new()
            .with_entry(INVERSE_KEY, json!(true))
            .is_inverse());
        assert!(!ScoringTable::new()
            .with_entry(INVERSE_KEY, json!("true"))
            .is_inverse());
        assert!(!ScoringTable::new().is_inverse());
    }

    #[test]
    fn test_percent_for_bounds() {
        let table = ScoringTable::new()
            .with_entry("all", json!(100))
            .with_entry("none", json!(0))
            .with_entry("half", json!(50.5))
            .with_entry("over", json!(101))
            .with_entry("under", json!(-1))
            .with_entry("text", json!("50"));

        assert_eq!(table.percent_for("all"), Some(100.0));
        assert_eq!(table.percent_for("none"), Some(0.0));
        assert_eq!(table.percent_for("half"), Some(50.5));
        assert_eq!(table.percent_for("over"), None);
        assert_eq!(table.percent_for("under"), None);
        assert_eq!(table.percent_for("text"), None);
        assert_eq!(table.percent_for("missing"), None);
    }

    #[test]
    fn test_load_spec_by_extension() {
        let json_path = env::temp_dir().join("survey_score_test_spec.json");
        fs::write(&json_path, SPEC_JSON).unwrap();
        let spec = load_scoring_spec(&json_path).unwrap();
        assert_eq!(spec.question_count(), 3);
        let _ = fs::remove_file(&json_path);

        let yaml_path = env::temp_dir().join("survey_score_test_spec.yml");
        fs::write(
            &yaml_path,
            "sections:\n  sectionOne:\n    questions:\n      q1:\n        points: 3\n",
        )
        .unwrap();
        let spec = load_scoring_spec(&yaml_path).unwrap();
        assert_eq!(spec.question_count(), 1);
        let _ = fs::remove_file(&yaml_path);
    }

    #[test]
    fn test_load_missing_spec() {
        let path = env::temp_dir().join("survey_score_test_missing_spec.json");
        let _ = fs::remove_file(&path);
        assert!(matches!(
            load_scoring_spec(&path),
            Err(SpecLoadError::Io { .. })
        ));
    }
}
