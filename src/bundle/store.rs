//! Backing stores for translation bundles.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::TranslationBundle;
use super::properties::{
    self,
    PropertiesError,
};
use crate::locale::LocaleSpec;

/// Errors raised while loading a bundle.
#[derive(Error, Debug)]
pub enum BundleError {
    /// No bundle exists for the locale, not even the base one.
    #[error("Can't find bundle for base name {base_name}, locale {locale}")]
    NotFound { base_name: String, locale: LocaleSpec },

    #[error("Failed to read bundle file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse bundle file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PropertiesError,
    },
}

/// Read-only source of translation bundles keyed by base name and locale.
pub trait BundleStore {
    /// Loads the bundle for `locale`.
    ///
    /// # Errors
    /// `BundleError::NotFound` when nothing exists for the locale.
    fn load(&self, base_name: &str, locale: &LocaleSpec) -> Result<TranslationBundle, BundleError>;
}

/// Reads `<base>_<locale>.properties` files from a directory.
///
/// A locale inherits from its parents: `pt_BR` is backed by
/// `messages_pt_BR.properties`, then `messages_pt.properties`, then
/// `messages.properties`. Keys of a more specific file win.
#[derive(Debug, Clone)]
pub struct PropertiesStore {
    /// Directory holding the properties files.
    root: PathBuf,
}

impl PropertiesStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Candidate files from most to least specific.
    #[must_use]
    pub fn candidate_paths(&self, base_name: &str, locale: &LocaleSpec) -> Vec<PathBuf> {
        locale
            .fallback_chain()
            .into_iter()
            .map(|suffix| format!("{base_name}_{suffix}.properties"))
            .chain(std::iter::once(format!("{base_name}.properties")))
            .map(|file_name| self.root.join(file_name))
            .collect()
    }

    /// Reads and parses one file; `Ok(None)` when it does not exist.
    fn read_file(path: &Path) -> Result<Option<Vec<(String, String)>>, BundleError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(BundleError::Io { path: path.to_path_buf(), source }),
        };

        let text = properties::decode(&bytes);
        let entries = properties::parse(&text)
            .map_err(|source| BundleError::Parse { path: path.to_path_buf(), source })?;

        tracing::debug!(path = %path.display(), entries = entries.len(), "Read properties file");
        Ok(Some(entries))
    }
}

impl BundleStore for PropertiesStore {
    fn load(&self, base_name: &str, locale: &LocaleSpec) -> Result<TranslationBundle, BundleError> {
        let mut bundle = TranslationBundle::new(locale.clone());
        let mut found = false;

        for path in self.candidate_paths(base_name, locale) {
            let Some(entries) = Self::read_file(&path)? else {
                continue;
            };

            // Last value wins inside a file, the most specific file wins across files.
            let file_bundle = TranslationBundle::from_entries(locale.clone(), entries);
            for (key, value) in file_bundle.iter() {
                bundle.insert_if_absent(key.to_string(), value.to_string());
            }
            found = true;
        }

        if !found {
            return Err(BundleError::NotFound {
                base_name: base_name.to_string(),
                locale: locale.clone(),
            });
        }

        Ok(bundle)
    }
}

/// In-memory store, for hosts that already hold their translations.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// (base name, locale) → entries in insertion order.
    bundles: HashMap<(String, LocaleSpec), Vec<(String, String)>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the entries of one bundle, replacing any previous ones.
    pub fn insert<K, V>(
        &mut self,
        base_name: &str,
        locale: LocaleSpec,
        entries: impl IntoIterator<Item = (K, V)>,
    ) where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.bundles.insert((base_name.to_string(), locale), entries);
    }
}

impl BundleStore for MemoryStore {
    fn load(&self, base_name: &str, locale: &LocaleSpec) -> Result<TranslationBundle, BundleError> {
        self.bundles
            .get(&(base_name.to_string(), locale.clone()))
            .map(|entries| TranslationBundle::from_entries(locale.clone(), entries.iter().cloned()))
            .ok_or_else(|| BundleError::NotFound {
                base_name: base_name.to_string(),
                locale: locale.clone(),
            })
    }
}
