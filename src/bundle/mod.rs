//! Translation bundles and the stores they are loaded from.
pub mod properties;
pub mod store;

use indexmap::IndexMap;

use crate::locale::LocaleSpec;

pub use store::{
    BundleError,
    BundleStore,
    MemoryStore,
    PropertiesStore,
};

/// Key → localized string pairs for one locale.
///
/// Keys are unique; iteration follows the order in which the store yielded them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationBundle {
    /// Locale the bundle was requested for.
    locale: LocaleSpec,
    /// Entries in store order.
    entries: IndexMap<String, String>,
}

impl TranslationBundle {
    #[must_use]
    pub fn new(locale: LocaleSpec) -> Self {
        Self { locale, entries: IndexMap::new() }
    }

    /// Builds a bundle from pairs; a repeated key keeps its first position and its last value.
    #[must_use]
    pub fn from_entries<K, V>(locale: LocaleSpec, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut bundle = Self::new(locale);
        for (key, value) in entries {
            bundle.insert(key.into(), value.into());
        }
        bundle
    }

    /// Inserts or replaces a value; a replaced key keeps its position.
    pub fn insert(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    /// Inserts only when the key is not present yet.
    pub fn insert_if_absent(&mut self, key: String, value: String) {
        self.entries.entry(key).or_insert(value);
    }

    #[must_use]
    pub const fn locale(&self) -> &LocaleSpec {
        &self.locale
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
