use serde::{Deserialize, Serialize};

use super::dictionary::{builtin_dictionaries, Dictionary};
use super::history::HistoryEntry;

/// Maximum number of entries kept in `search_history`.
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// Top-level settings record shared by the background service, popup and options page.
///
/// Serialized with camelCase keys; this is the exact shape stored under the
/// `settings` key and written by export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub default_dictionary: Option<String>,
    pub fallback_dictionary: Option<String>,
    pub tab_behavior: TabBehavior,
    pub history_enabled: bool,
    pub first_run: bool,
    pub dictionaries: Vec<Dictionary>,
    /// Most recent first.
    pub search_history: Vec<HistoryEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_dictionary: None,
            fallback_dictionary: None,
            tab_behavior: TabBehavior::New,
            history_enabled: false,
            first_run: true,
            dictionaries: builtin_dictionaries(),
            search_history: Vec::new(),
        }
    }
}

impl Settings {
    /// Enabled dictionaries in list order.
    pub fn enabled_dictionaries(&self) -> impl Iterator<Item = &Dictionary> {
        self.dictionaries.iter().filter(|d| d.enabled)
    }

    pub fn find_dictionary(&self, id: &str) -> Option<&Dictionary> {
        self.dictionaries.iter().find(|d| d.id == id)
    }

    pub fn find_enabled_dictionary(&self, id: &str) -> Option<&Dictionary> {
        self.enabled_dictionaries().find(|d| d.id == id)
    }

    pub fn first_enabled_dictionary(&self) -> Option<&Dictionary> {
        self.enabled_dictionaries().next()
    }

    /// The configured default, if set and still present.
    pub fn default_dictionary(&self) -> Option<&Dictionary> {
        self.default_dictionary
            .as_deref()
            .and_then(|id| self.find_dictionary(id))
    }

    /// The configured fallback, if set and still present.
    pub fn fallback_dictionary(&self) -> Option<&Dictionary> {
        self.fallback_dictionary
            .as_deref()
            .and_then(|id| self.find_dictionary(id))
    }

    /// True while the first-run default has not been captured yet. An empty
    /// default id counts as unset.
    pub fn awaiting_default_capture(&self) -> bool {
        self.first_run && self.default_dictionary.as_deref().map_or(true, str::is_empty)
    }
}

/// Whether repeat lookups against a dictionary open a fresh tab or reuse the last one.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TabBehavior {
    #[default]
    New,
    Reuse,
}
