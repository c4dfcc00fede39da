use thiserror::Error;

use crate::config::{FormSettings, Settings};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct SettingsValidator;

impl SettingsValidator {
    /// Check every setting, collecting all problems instead of stopping at the first
    pub fn validate(settings: &Settings) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_form(&settings.form) {
            errors.extend(e);
        }

        if settings.log_level.parse::<tracing::Level>().is_err() {
            errors.push(ConfigError::InvalidValue {
                field: "log_level".to_string(),
                reason: format!(
                    "'{}' is not one of trace, debug, info, warn, error",
                    settings.log_level
                ),
            });
        }

        if let Some(dir) = &settings.schema_dir {
            if !dir.is_dir() {
                errors.push(ConfigError::InvalidValue {
                    field: "schema_dir".to_string(),
                    reason: format!("{} is not a directory", dir.display()),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_form(form: &FormSettings) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if form.show_submit_button && form.submit_button_text.trim().is_empty() {
            errors.push(ConfigError::MissingField(
                "form.submit_button_text".to_string(),
            ));
        }

        if form.textarea_threshold == 0 {
            errors.push(ConfigError::InvalidValue {
                field: "form.textarea_threshold".to_string(),
                reason: "Threshold must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(SettingsValidator::validate(&Settings::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut settings = Settings::default();
        settings.form.submit_button_text = "  ".to_string();
        settings.form.textarea_threshold = 0;
        settings.log_level = "loud".to_string();
        settings.schema_dir = Some(PathBuf::from("/definitely/not/here"));

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors[0],
            ConfigError::MissingField("form.submit_button_text".to_string())
        );
    }

    #[test]
    fn test_empty_label_allowed_when_button_hidden() {
        let mut settings = Settings::default();
        settings.form.show_submit_button = false;
        settings.form.submit_button_text = String::new();
        assert!(SettingsValidator::validate(&settings).is_ok());
    }
}
