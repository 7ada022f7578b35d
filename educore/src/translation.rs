use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_LOCALE: &str = "fr";

/// UI strings for one locale as served by the translations endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Translations {
    pub locale: String,
    pub entries: BTreeMap<String, String>,
}

impl Translations {
    pub fn new(locale: impl Into<String>, entries: BTreeMap<String, String>) -> Self {
        Self { locale: locale.into(), entries }
    }

    /// An empty table, used when the translations could not be loaded.
    pub fn empty(locale: impl Into<String>) -> Self {
        Self::new(locale, BTreeMap::new())
    }

    /// Look up `key`, falling back to the key itself.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
