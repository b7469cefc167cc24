use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "baseName")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Encoding used when `encoding` is unset or blank.
pub const DEFAULT_ENCODING: &str = "UTF-8";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    /// Comma separated locale list, e.g. `"pt,pt_BR,en,es"`.
    ///
    /// Not validated here: an absent or empty list is reported when the
    /// locales are resolved, so a broken list only disables the export.
    pub locales: Option<String>,

    /// Output text encoding label (WHATWG labels, e.g. `"utf-8"`, `"iso-8859-1"`).
    /// Falls back to UTF-8 when unset or blank.
    pub encoding: Option<String>,

    /// Bundle base name, `messages` gives `messages_<locale>.properties`.
    pub base_name: String,

    /// Directory holding the `.properties` files. Relative paths are resolved
    /// against the project directory.
    pub resources_dir: PathBuf,

    /// Root under which `js/i18n/` is created. Defaults to the project directory.
    pub output_root: Option<PathBuf>,
}

impl ExportSettings {
    /// Encoding label to write with, after applying the UTF-8 default.
    #[must_use]
    pub fn encoding_label(&self) -> &str {
        self.encoding
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(DEFAULT_ENCODING)
    }

    /// # Errors
    /// - Empty base name
    /// - Unknown encoding label
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.base_name.trim().is_empty() {
            errors.push(ValidationError::new(
                "baseName",
                "The base name cannot be empty. Example: \"messages\"",
            ));
        }

        let label = self.encoding_label();
        if encoding_rs::Encoding::for_label(label.as_bytes()).is_none() {
            errors.push(ValidationError::new(
                "encoding",
                format!("Unknown encoding '{label}'. Example: \"UTF-8\" or \"ISO-8859-1\""),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            locales: None,
            encoding: None,
            base_name: "messages".to_string(),
            resources_dir: PathBuf::from("resources"),
            output_root: None,
        }
    }
}

/// Values given on the command line, applied on top of the settings file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub locales: Option<String>,
    pub encoding: Option<String>,
    pub base_name: Option<String>,
    pub resources_dir: Option<PathBuf>,
    pub output_root: Option<PathBuf>,
}

impl ExportSettings {
    /// Returns the settings with every `Some` override applied.
    #[must_use]
    pub fn with_overrides(self, overrides: SettingsOverrides) -> Self {
        Self {
            locales: overrides.locales.or(self.locales),
            encoding: overrides.encoding.or(self.encoding),
            base_name: overrides.base_name.unwrap_or(self.base_name),
            resources_dir: overrides.resources_dir.unwrap_or(self.resources_dir),
            output_root: overrides.output_root.or(self.output_root),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = ExportSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"locales": "pt,pt_BR,en", "encoding": "ISO-8859-1"}"#;

        let settings: ExportSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.base_name, eq("messages"));
        assert_that!(settings.locales, some(eq("pt,pt_BR,en")));
        assert_that!(settings.encoding_label(), eq("ISO-8859-1"));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: ExportSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.base_name, eq("messages"));
        assert_that!(settings.locales, none());
        assert_that!(settings.output_root, none());
        assert_eq!(settings.resources_dir, PathBuf::from("resources"));
        assert_that!(settings.encoding_label(), eq(DEFAULT_ENCODING));
    }

    #[rstest]
    #[case::unset(None)]
    #[case::empty(Some(""))]
    #[case::blank(Some("  "))]
    fn encoding_label_defaults_to_utf8(#[case] encoding: Option<&str>) {
        let settings = ExportSettings {
            encoding: encoding.map(ToString::to_string),
            ..ExportSettings::default()
        };

        assert_eq!(settings.encoding_label(), "UTF-8");
    }

    #[rstest]
    fn validate_invalid_base_name_empty() {
        let settings = ExportSettings { base_name: String::new(), ..ExportSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("baseName")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_encoding() {
        let settings =
            ExportSettings { encoding: Some("klingon-8".to_string()), ..ExportSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("encoding")),
                field!(ValidationError.message, contains_substring("klingon-8"))
            ]])
        );
    }

    #[rstest]
    fn validate_missing_locales_is_not_a_validation_error() {
        let settings = ExportSettings { locales: None, ..ExportSettings::default() };

        assert!(settings.validate().is_ok());
    }

    #[rstest]
    fn with_overrides_replaces_only_given_values() {
        let settings = ExportSettings {
            locales: Some("en".to_string()),
            encoding: Some("UTF-8".to_string()),
            ..ExportSettings::default()
        };
        let overrides = SettingsOverrides {
            locales: Some("pt_BR,es".to_string()),
            base_name: Some("labels".to_string()),
            ..SettingsOverrides::default()
        };

        let merged = settings.with_overrides(overrides);

        assert_that!(merged.locales, some(eq("pt_BR,es")));
        assert_that!(merged.encoding, some(eq("UTF-8")));
        assert_that!(merged.base_name, eq("labels"));
        assert_eq!(merged.resources_dir, PathBuf::from("resources"));
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = ExportSettings {
            base_name: String::new(),
            encoding: Some("nope".to_string()),
            ..ExportSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. baseName"));
        assert_that!(error_message, contains_substring("2. encoding"));
    }
}
