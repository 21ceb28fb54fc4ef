//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ExtensionConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate an extension configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ExtensionConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ExtensionConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_io_error() {
        let err = load_config(Path::new("/nonexistent/mercury-ext.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn invalid_toml_reports_parse_error() {
        let dir = std::env::temp_dir();
        let path = dir.join("mercury-ext-loader-parse-test.toml");
        fs::write(&path, "daemon = not valid toml [").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn semantic_violations_surface_as_validation_errors() {
        let dir = std::env::temp_dir();
        let path = dir.join("mercury-ext-loader-validation-test.toml");
        fs::write(&path, "[daemon]\nhost = \"\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors, vec![ValidationError::EmptyHost]);
            }
            other => panic!("expected validation error, got {}", other),
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn well_formed_file_loads() {
        let dir = std::env::temp_dir();
        let path = dir.join("mercury-ext-loader-ok-test.toml");
        fs::write(&path, "[daemon]\nport = 9400\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.daemon.port, 9400);

        let _ = fs::remove_file(&path);
    }
}
