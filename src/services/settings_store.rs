// Quick Define Settings Store
// Owns the persisted settings record: merge over defaults, whole-object saves,
// dictionary CRUD, history, first-run capture, export and import.
// Every mutation is a read-modify-write of the full object under the `settings` key.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::services::storage::{KeyValueStore, SETTINGS_KEY};
use crate::services::url_builder::placeholder_count;
use crate::types::dictionary::{Dictionary, DictionaryUpdate, NewDictionary, CUSTOM_ID_PREFIX};
use crate::types::errors::{StorageError, StoreError};
use crate::types::history::HistoryEntry;
use crate::types::settings::{Settings, TabBehavior, MAX_HISTORY_ENTRIES};

/// File name suggested to the user when exporting settings.
pub const EXPORT_FILE_NAME: &str = "quick-define-settings.json";

/// Settings store over any key-value storage area.
pub struct SettingsStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    /// Returns the persisted settings merged over the defaults.
    ///
    /// Top-level keys that are missing (or stored as `null`) come from
    /// `Settings::default()`. When nothing is persisted yet, the full default
    /// object is written first; a stored `null` counts as nothing persisted.
    pub fn get_settings(&mut self) -> Result<Settings, StoreError> {
        match self.backend.get(SETTINGS_KEY)? {
            Some(stored) if !stored.is_null() => {
                merge_over_defaults(stored).map_err(StoreError::Corrupt)
            }
            _ => {
                let defaults = Settings::default();
                self.save_settings(&defaults)?;
                debug!("seeded storage with default settings");
                Ok(defaults)
            }
        }
    }

    /// Persists the full settings object, replacing whatever was stored.
    pub fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        let value = serde_json::to_value(settings)
            .map_err(|e| StorageError::Serialization(format!("Failed to serialize settings: {}", e)))?;
        self.backend.set(SETTINGS_KEY, value)?;
        Ok(())
    }

    fn modify<T, F>(&mut self, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Settings) -> Result<T, StoreError>,
    {
        let mut settings = self.get_settings()?;
        let out = apply(&mut settings)?;
        self.save_settings(&settings)?;
        Ok(out)
    }

    // ─── Dictionaries ───

    pub fn get_dictionaries(&mut self) -> Result<Vec<Dictionary>, StoreError> {
        Ok(self.get_settings()?.dictionaries)
    }

    pub fn get_enabled_dictionaries(&mut self) -> Result<Vec<Dictionary>, StoreError> {
        Ok(self
            .get_settings()?
            .dictionaries
            .into_iter()
            .filter(|d| d.enabled)
            .collect())
    }

    pub fn save_dictionaries(&mut self, dictionaries: Vec<Dictionary>) -> Result<(), StoreError> {
        self.modify(|s| {
            s.dictionaries = dictionaries;
            Ok(())
        })
    }

    /// Appends a user-defined dictionary with a fresh `custom-` id.
    pub fn add_custom_dictionary(&mut self, input: NewDictionary) -> Result<Dictionary, StoreError> {
        let name = input.name.trim().to_string();
        let url = input.url.trim().to_string();
        validate_entry(&name, &url)?;

        let dictionary = Dictionary {
            id: format!("{}{}", CUSTOM_ID_PREFIX, Uuid::new_v4()),
            name,
            url,
            icon: normalize_icon(input.icon),
            enabled: true,
            builtin: false,
        };
        let stored = dictionary.clone();
        self.modify(move |s| {
            s.dictionaries.push(stored);
            Ok(())
        })?;
        info!(id = %dictionary.id, name = %dictionary.name, "added custom dictionary");
        Ok(dictionary)
    }

    /// Applies a partial update and returns the updated dictionary.
    pub fn update_dictionary(
        &mut self,
        id: &str,
        changes: DictionaryUpdate,
    ) -> Result<Dictionary, StoreError> {
        self.modify(|s| {
            let dict = s
                .dictionaries
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| StoreError::DictionaryNotFound(id.to_string()))?;

            if changes.name.is_some() || changes.url.is_some() {
                let name = changes.name.as_deref().map(str::trim).unwrap_or(dict.name.as_str()).to_string();
                let url = changes.url.as_deref().map(str::trim).unwrap_or(dict.url.as_str()).to_string();
                validate_entry(&name, &url)?;
                dict.name = name;
                dict.url = url;
            }
            if let Some(icon) = changes.icon {
                dict.icon = normalize_icon(Some(icon));
            }
            if let Some(enabled) = changes.enabled {
                dict.enabled = enabled;
            }
            Ok(dict.clone())
        })
    }

    pub fn set_dictionary_enabled(&mut self, id: &str, enabled: bool) -> Result<(), StoreError> {
        self.update_dictionary(
            id,
            DictionaryUpdate {
                enabled: Some(enabled),
                ..DictionaryUpdate::default()
            },
        )
        .map(|_| ())
    }

    /// Removes a custom dictionary. Returns `false` if no dictionary had that id.
    ///
    /// A default or fallback pointing at the removed dictionary is cleared.
    pub fn remove_dictionary(&mut self, id: &str) -> Result<bool, StoreError> {
        self.modify(|s| {
            let Some(pos) = s.dictionaries.iter().position(|d| d.id == id) else {
                return Ok(false);
            };
            if s.dictionaries[pos].builtin {
                return Err(StoreError::BuiltinDictionary(id.to_string()));
            }
            s.dictionaries.remove(pos);
            if s.default_dictionary.as_deref() == Some(id) {
                s.default_dictionary = None;
            }
            if s.fallback_dictionary.as_deref() == Some(id) {
                s.fallback_dictionary = None;
            }
            Ok(true)
        })
    }

    /// Reorders dictionaries: `ordered_ids` first, in that order, then every
    /// dictionary not listed, keeping its previous relative position.
    /// Unknown and repeated ids are ignored.
    pub fn reorder_dictionaries(&mut self, ordered_ids: &[String]) -> Result<(), StoreError> {
        self.modify(|s| {
            let mut remaining = std::mem::take(&mut s.dictionaries);
            let mut reordered = Vec::with_capacity(remaining.len());
            for id in ordered_ids {
                if let Some(pos) = remaining.iter().position(|d| &d.id == id) {
                    reordered.push(remaining.remove(pos));
                }
            }
            reordered.extend(remaining);
            s.dictionaries = reordered;
            Ok(())
        })
    }

    /// Moves the dictionary at `from` to position `to` (clamped to the list end).
    pub fn move_dictionary(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        self.modify(|s| {
            if from >= s.dictionaries.len() {
                return Err(StoreError::DictionaryNotFound(format!("position {}", from)));
            }
            let moved = s.dictionaries.remove(from);
            let to = to.min(s.dictionaries.len());
            s.dictionaries.insert(to, moved);
            Ok(())
        })
    }

    // ─── Defaults and behavior ───

    pub fn get_default_dictionary(&mut self) -> Result<Option<Dictionary>, StoreError> {
        Ok(self.get_settings()?.default_dictionary().cloned())
    }

    pub fn set_default_dictionary(&mut self, id: Option<&str>) -> Result<(), StoreError> {
        self.modify(|s| {
            s.default_dictionary = dictionary_ref(id);
            Ok(())
        })
    }

    pub fn get_fallback_dictionary(&mut self) -> Result<Option<Dictionary>, StoreError> {
        Ok(self.get_settings()?.fallback_dictionary().cloned())
    }

    pub fn set_fallback_dictionary(&mut self, id: Option<&str>) -> Result<(), StoreError> {
        self.modify(|s| {
            s.fallback_dictionary = dictionary_ref(id);
            Ok(())
        })
    }

    pub fn get_tab_behavior(&mut self) -> Result<TabBehavior, StoreError> {
        Ok(self.get_settings()?.tab_behavior)
    }

    pub fn set_tab_behavior(&mut self, behavior: TabBehavior) -> Result<(), StoreError> {
        self.modify(|s| {
            s.tab_behavior = behavior;
            Ok(())
        })
    }

    pub fn is_history_enabled(&mut self) -> Result<bool, StoreError> {
        Ok(self.get_settings()?.history_enabled)
    }

    pub fn set_history_enabled(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.modify(|s| {
            s.history_enabled = enabled;
            Ok(())
        })
    }

    // ─── History ───

    pub fn get_search_history(&mut self) -> Result<Vec<HistoryEntry>, StoreError> {
        Ok(self.get_settings()?.search_history)
    }

    /// The `limit` most recent entries.
    pub fn recent_history(&mut self, limit: usize) -> Result<Vec<HistoryEntry>, StoreError> {
        let mut history = self.get_search_history()?;
        history.truncate(limit);
        Ok(history)
    }

    /// Records a lookup. Returns `false` without touching storage when history is off.
    pub fn add_to_history(&mut self, word: &str, dictionary_id: &str) -> Result<bool, StoreError> {
        let mut settings = self.get_settings()?;
        if !settings.history_enabled {
            return Ok(false);
        }

        settings.search_history.insert(
            0,
            HistoryEntry {
                word: word.to_string(),
                dictionary_id: dictionary_id.to_string(),
                timestamp: Self::now_millis(),
            },
        );
        settings.search_history.truncate(MAX_HISTORY_ENTRIES);
        self.save_settings(&settings)?;
        Ok(true)
    }

    pub fn clear_history(&mut self) -> Result<(), StoreError> {
        self.modify(|s| {
            s.search_history.clear();
            Ok(())
        })
    }

    // ─── First run ───

    pub fn is_first_run(&mut self) -> Result<bool, StoreError> {
        Ok(self.get_settings()?.first_run)
    }

    pub fn set_first_run_complete(&mut self) -> Result<(), StoreError> {
        self.modify(|s| {
            s.first_run = false;
            Ok(())
        })
    }

    /// Promotes `dictionary_id` to default if this is the first resolved lookup.
    ///
    /// Fires at most once: after it returns `true`, `first_run` is false and
    /// every later call is a no-op returning `false`.
    pub fn capture_first_run_default(&mut self, dictionary_id: &str) -> Result<bool, StoreError> {
        let mut settings = self.get_settings()?;
        if !settings.awaiting_default_capture() {
            return Ok(false);
        }
        settings.default_dictionary = Some(dictionary_id.to_string());
        settings.first_run = false;
        self.save_settings(&settings)?;
        info!(dictionary = %dictionary_id, "captured first-run default dictionary");
        Ok(true)
    }

    // ─── Export / import ───

    /// Pretty-printed JSON of the full settings object.
    pub fn export_settings(&mut self) -> Result<String, StoreError> {
        let settings = self.get_settings()?;
        let json = serde_json::to_string_pretty(&settings)
            .map_err(|e| StorageError::Serialization(format!("Failed to serialize settings: {}", e)))?;
        Ok(json)
    }

    /// Replaces the store with an exported document.
    ///
    /// All or nothing: if the text does not parse into a settings object, the
    /// stored record is left as it was.
    pub fn import_settings(&mut self, json: &str) -> Result<Settings, StoreError> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "rejected settings import");
            StoreError::InvalidImport(e.to_string())
        })?;
        let settings = merge_over_defaults(value).map_err(|e| {
            warn!(error = %e, "rejected settings import");
            StoreError::InvalidImport(e)
        })?;
        self.save_settings(&settings)?;
        info!(dictionaries = settings.dictionaries.len(), "imported settings");
        Ok(settings)
    }

    /// Restores factory defaults.
    pub fn reset(&mut self) -> Result<Settings, StoreError> {
        let defaults = Settings::default();
        self.save_settings(&defaults)?;
        Ok(defaults)
    }
}

/// Shallow merge of a stored object over the default settings.
fn merge_over_defaults(stored: Value) -> Result<Settings, String> {
    let overlay = match stored {
        Value::Object(map) => map,
        other => return Err(format!("expected a settings object, found {}", json_kind(&other))),
    };

    let mut merged = match serde_json::to_value(Settings::default()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    for (key, value) in overlay {
        if !value.is_null() {
            merged.insert(key, value);
        }
    }

    serde_json::from_value(Value::Object(merged)).map_err(|e| e.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn validate_entry(name: &str, url: &str) -> Result<(), StoreError> {
    if name.is_empty() || url.is_empty() {
        return Err(StoreError::InvalidDictionary(
            "Name and URL are required".to_string(),
        ));
    }
    match placeholder_count(url) {
        1 => Ok(()),
        0 => Err(StoreError::InvalidDictionary(
            "URL must contain {word} placeholder".to_string(),
        )),
        n => Err(StoreError::InvalidDictionary(format!(
            "URL must contain exactly one {{word}} placeholder, found {}",
            n
        ))),
    }
}

/// A blank id clears the reference.
fn dictionary_ref(id: Option<&str>) -> Option<String> {
    id.map(str::trim).filter(|id| !id.is_empty()).map(str::to_string)
}

fn normalize_icon(icon: Option<String>) -> Option<String> {
    icon.map(|i| i.trim().to_string()).filter(|i| !i.is_empty())
}
