//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{normalize_base_path, AppConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::view::ViewRegistry;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a configuration from TOML text, apply environment overrides and validate.
pub fn parse_config<F>(content: &str, views: &ViewRegistry, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: AppConfig = toml::from_str(content)?;
    apply_env_overrides(&mut config, lookup);

    validate_config(&config, views).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path, views: &ViewRegistry) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content, views, |key| std::env::var(key).ok())?;

    tracing::debug!(path = %path.display(), routes = config.routes.len(), "Configuration file loaded");
    Ok(config)
}

/// Built-in configuration with environment overrides, used when no file is given.
pub fn default_config(views: &ViewRegistry) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config, views).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// `BASE_URL` wins over the file when set and non-empty.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("BASE_URL").filter(|base| !base.trim().is_empty()) {
        Some(base) => {
            tracing::debug!(base_url = %base, "BASE_URL overrides router.base_path");
            config.router.base_path = normalize_base_path(&base);
        }
        None => {
            config.router.base_path = normalize_base_path(&config.router.base_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::views::default_views;
    use crate::routing::HistoryMode;
    use std::io::Write;

    const SAMPLE: &str = r#"
title = "Test"

[router]
base_path = "laRechercheWeb"
history_mode = "hash"

[[routes]]
path = "/"
name = "Home"
view = "home"

[[routes]]
path = "/recherche"
name = "Recherche"
view = "recherche"
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE, &default_views(), |_| None).unwrap();
        assert_eq!(config.title, "Test");
        assert_eq!(config.router.base_path, "/laRechercheWeb/");
        assert_eq!(config.router.history_mode, HistoryMode::Hash);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.listener.bind_address, "127.0.0.1:5173");
    }

    #[test]
    fn test_base_url_overrides_file() {
        let config = parse_config(SAMPLE, &default_views(), |key| {
            (key == "BASE_URL").then(|| "/autre/".to_string())
        })
        .unwrap();
        assert_eq!(config.router.base_path, "/autre/");
    }

    #[test]
    fn test_relative_base_path_is_normalized() {
        let content = "[router]\nbase_path = \"laRechercheWeb\"\n";
        let config = parse_config(content, &default_views(), |_| None).unwrap();
        assert_eq!(config.router.base_path, "/laRechercheWeb/");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("", &default_views(), |_| None).unwrap();
        assert_eq!(config.router.base_path, "/");
        assert_eq!(config.routes.len(), 2);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("routes = 3", &default_views(), |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error() {
        let content = "[[routes]]\npath = \"/x\"\nname = \"X\"\nview = \"nope\"\n";
        let err = parse_config(content, &default_views(), |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("unknown view 'nope'"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = load_config(file.path(), &default_views()).unwrap();
        assert_eq!(config.routes[1].name, "Recherche");
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml"), &default_views()).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
