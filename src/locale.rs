//! Locale list resolution.

use std::fmt;

use thiserror::Error;

/// Opaque locale identifier (e.g. `en`, `pt_BR`), kept exactly as configured.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleSpec(String);

impl LocaleSpec {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bundle name suffixes from most to least specific.
    ///
    /// `pt_BR_var` → `["pt_BR_var", "pt_BR", "pt"]`
    #[must_use]
    pub fn fallback_chain(&self) -> Vec<&str> {
        let mut chain = vec![self.as_str()];
        let mut current = self.as_str();
        while let Some((parent, _)) = current.rsplit_once('_') {
            if parent.is_empty() {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }
}

impl fmt::Display for LocaleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocaleSpec {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The locale list is missing or contains no locale.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not find any locales in the 'locales' setting: {reason}")]
pub struct ConfigurationError {
    pub reason: &'static str,
}

/// Parses a comma separated locale list.
///
/// Every non-empty segment becomes one [`LocaleSpec`], verbatim and in input order.
///
/// # Errors
/// `ConfigurationError` when the value is absent, empty, or has no non-empty segment.
pub fn resolve_locales(config: Option<&str>) -> Result<Vec<LocaleSpec>, ConfigurationError> {
    let Some(config) = config else {
        return Err(ConfigurationError { reason: "the setting is absent" });
    };
    if config.is_empty() {
        return Err(ConfigurationError { reason: "the setting is empty" });
    }

    let locales: Vec<LocaleSpec> =
        config.split(',').filter(|segment| !segment.is_empty()).map(LocaleSpec::from).collect();

    if locales.is_empty() {
        return Err(ConfigurationError { reason: "the setting has no locale between the commas" });
    }

    Ok(locales)
}
