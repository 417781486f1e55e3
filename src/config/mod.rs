mod schema;

pub use schema::{validate_config, Config};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Get the config directory path (~/.config/survey-score/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("survey-score"))
}

/// Get the default config file path (~/.config/survey-score/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/survey-score/config.yaml) and falls back to built-in defaults
///   when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => match get_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("no config file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    debug!(path = %config_path.display(), sections = config.sections.len(), "loaded config");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_explicit_missing_config_errors() {
        let path = env::temp_dir().join("survey_score_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_load_explicit_config() {
        let path = env::temp_dir().join("survey_score_test_config.yaml");
        fs::write(&path, "sections: [intro, risk]\ninclude_unanswered: true\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.sections, vec!["intro", "risk"]);
        assert!(config.include_unanswered);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml_errors() {
        let path = env::temp_dir().join("survey_score_test_bad_config.yaml");
        fs::write(&path, "sections: [unclosed\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_config_path_under_config_dir() {
        if let (Some(dir), Some(path)) = (get_config_dir(), get_config_path()) {
            assert!(path.starts_with(dir));
            assert!(path.ends_with("config.yaml"));
        }
    }
}
