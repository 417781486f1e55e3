use crate::sections::{SectionCatalog, DEFAULT_SECTION_IDS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Tool configuration.
///
/// Example YAML:
/// ```yaml
/// sections: [one, two, three]
/// include_unanswered: false
/// spec: ./survey-results.json
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Section ids in declaration order (default: `one` through `ten`)
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,

    /// Score every declared question, passing `null` for unanswered ones
    #[serde(default)]
    pub include_unanswered: bool,

    /// Scoring spec used when `--spec` is not given
    #[serde(default)]
    pub spec: Option<PathBuf>,
}

fn default_sections() -> Vec<String> {
    DEFAULT_SECTION_IDS.iter().map(|id| id.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            include_unanswered: false,
            spec: None,
        }
    }
}

impl Config {
    pub fn catalog(&self) -> SectionCatalog {
        SectionCatalog::new(self.sections.iter().cloned())
    }
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, id) in config.sections.iter().enumerate() {
        if id.trim().is_empty() {
            errors.push(format!("sections[{}]: section id must not be empty", i));
        } else if !seen.insert(id.as_str()) {
            errors.push(format!("sections[{}]: duplicate section id '{}'", i, id));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sections.len(), 10);
        assert_eq!(config.sections[0], "one");
        assert!(!config.include_unanswered);
        assert!(config.spec.is_none());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            sections: vec!["intro".to_string(), "risk".to_string()],
            include_unanswered: true,
            spec: Some(PathBuf::from("survey-results.json")),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
sections: [one, two]
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.sections, vec!["one", "two"]);
        assert!(!config.include_unanswered);
        assert!(config.spec.is_none());
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("scoring: {}\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_from_config() {
        let config = Config {
            sections: vec!["alpha".to_string()],
            ..Config::default()
        };
        let catalog = config.catalog();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("sectionAlpha").is_some());
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_empty_section_list_is_allowed() {
        let config = Config {
            sections: Vec::new(),
            ..Config::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = Config {
            sections: vec![
                "one".to_string(),
                " ".to_string(), // Error 1
                "one".to_string(), // Error 2
            ],
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("sections[1]"));
        assert!(errors[1].contains("duplicate section id 'one'"));
    }
}
