use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod validator;

pub use validator::{ConfigError, SettingsValidator};

use crate::cli::Cli;

/// Config file read when nothing else is given
pub const DEFAULT_CONFIG_FILE: &str = "schemaform.toml";

/// Prefix of environment overrides, e.g. `SCHEMAFORM_FORM__SUBMIT_BUTTON_TEXT`
pub const ENV_PREFIX: &str = "SCHEMAFORM";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub form: FormSettings,
    /// Maximum level written by the binary's log subscriber
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory of named schema definitions referenced as `@Name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_dir: Option<PathBuf>,
}

/// Form display defaults
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FormSettings {
    #[serde(default = "default_submit_button_text")]
    pub submit_button_text: String,
    #[serde(default = "default_show_submit_button")]
    pub show_submit_button: bool,
    /// String fields whose `maxLength` exceeds this use a multi-line input
    #[serde(default = "default_textarea_threshold")]
    pub textarea_threshold: u64,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            submit_button_text: default_submit_button_text(),
            show_submit_button: default_show_submit_button(),
            textarea_threshold: default_textarea_threshold(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            form: FormSettings::default(),
            log_level: default_log_level(),
            schema_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_submit_button_text() -> String {
    "Submit".to_string()
}

fn default_show_submit_button() -> bool {
    true
}

fn default_textarea_threshold() -> u64 {
    100
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Create settings from CLI arguments (config file, env vars, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path` (optional) plus environment overrides
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let settings = Self::load(path)?;
        settings.validate()?;
        Ok(settings)
    }

    fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("log_level", default_log_level())?
            .set_default("form.submit_button_text", default_submit_button_text())?
            .set_default("form.show_submit_button", default_show_submit_button())?
            .set_default("form.textarea_threshold", default_textarea_threshold())?
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Apply CLI argument overrides to settings
    pub fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.schema_dir {
            self.schema_dir = Some(dir.clone());
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    /// Run [`SettingsValidator`], folding every problem into one error
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        SettingsValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::from_file(Path::new("/nonexistent/schemaform.toml")).unwrap();
        assert_eq!(settings.form, FormSettings::default());
        assert_eq!(settings.log_level, "info");
        assert!(settings.schema_dir.is_none());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let file = toml_file(
            r#"
log_level = "debug"

[form]
submit_button_text = "Save"
textarea_threshold = 250
"#,
        );

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.form.submit_button_text, "Save");
        assert_eq!(settings.form.textarea_threshold, 250);
        assert!(settings.form.show_submit_button);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = toml_file("log_level = \"debug\"\n");
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::parse_from([
            "schemaform",
            "--config",
            &path,
            "--log-level",
            "warn",
            "describe",
            "schema.json",
        ]);

        let settings = Settings::new_with_cli(&cli).unwrap();
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_invalid_file_fails_validation() {
        let file = toml_file("[form]\ntextarea_threshold = 0\n");
        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("form.textarea_threshold"));
    }
}
