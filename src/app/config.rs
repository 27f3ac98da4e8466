//! Configuration file loading.

use std::fs;
use std::path::Path;

use crate::domain::{AppConfig, AppError};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "lexprompt.toml";

/// Load and validate configuration.
///
/// An explicit path must exist. Without one, `lexprompt.toml` in the current
/// directory is used when present, otherwise defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let config = match path {
        Some(path) => parse_config_file(path)?,
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.is_file() { parse_config_file(fallback)? } else { AppConfig::default() }
        }
    };
    config.validate()?;
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<AppConfig, AppError> {
    let content = fs::read_to_string(path).map_err(|err| {
        AppError::config_error(format!("Failed to read config {}: {}", path.display(), err))
    })?;
    let config = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[gateway]\napi_base = \"http://localhost:9000\"\ntimeout_secs = 5\n")
            .unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.gateway.api_base.as_str(), "http://localhost:9000/");
        assert_eq!(config.gateway.timeout_secs, 5);
        assert_eq!(config.gateway.model, "gemini-2.5-flash");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(msg) if msg.contains("absent.toml")));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[gateway]\ntimeout_secs = 0\n").unwrap();

        assert!(matches!(load_config(Some(&path)), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[gateway\n").unwrap();

        assert!(matches!(load_config(Some(&path)), Err(AppError::TomlParseError(_))));
    }
}
