//! Request dispatcher for the Quick Define background service.
//!
//! Every browser callback (install, menu click, runtime message, storage
//! change, tab closed) is one [`Event`] variant handled by
//! [`Background::dispatch`], so the whole background behavior can be driven
//! by direct calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::managers::browser_tabs::TabApi;
use crate::managers::menu_controller::MenuController;
use crate::managers::menu_registry::MenuApi;
use crate::managers::tab_orchestrator::TabOrchestrator;
use crate::services::settings_store::SettingsStore;
use crate::services::storage::{KeyValueStore, SETTINGS_KEY};
use crate::types::dictionary::Dictionary;
use crate::types::errors::DispatchError;
use crate::types::menu::MenuTarget;
use crate::types::message::{Message, MessageResponse};
use crate::types::settings::Settings;
use crate::types::tab::TabId;

/// Storage area a change notification came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageArea {
    Local,
    Sync,
    Session,
}

/// Everything the background service reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Extension installed or updated.
    Installed,
    MenuClicked {
        menu_item_id: String,
        selection_text: Option<String>,
    },
    Message(Message),
    StorageChanged { area: StorageArea, key: String },
    TabRemoved { tab_id: TabId },
}

/// Outcome of opening one dictionary for a word.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lookup {
    pub dictionary_id: String,
    pub tab_id: TabId,
    /// Whether a history entry was written.
    pub recorded: bool,
}

/// Picks the dictionary for a `searchWord` message: the requested id, else the
/// configured default, else the first enabled dictionary.
///
/// A requested (or default) id that matches nothing resolves to `None`; it does
/// not fall through to the next rule.
pub fn resolve_message_dictionary<'a>(
    settings: &'a Settings,
    requested: Option<&str>,
) -> Option<&'a Dictionary> {
    let requested = requested.filter(|id| !id.is_empty());
    let default = settings.default_dictionary.as_deref().filter(|id| !id.is_empty());
    match (requested, default) {
        (Some(id), _) => settings.find_dictionary(id),
        (None, Some(id)) => settings.find_dictionary(id),
        (None, None) => settings.first_enabled_dictionary(),
    }
}

/// Picks the dictionary for a per-dictionary menu click: the clicked one if
/// enabled, else the fallback if enabled.
pub fn resolve_menu_dictionary<'a>(settings: &'a Settings, clicked: &str) -> Option<&'a Dictionary> {
    settings.find_enabled_dictionary(clicked).or_else(|| {
        settings
            .fallback_dictionary
            .as_deref()
            .and_then(|id| settings.find_enabled_dictionary(id))
    })
}

/// The background service: settings store, tab orchestrator and menu controller
/// behind one dispatch entry point.
pub struct Background<S: KeyValueStore, T: TabApi, M: MenuApi> {
    store: SettingsStore<S>,
    tabs: TabOrchestrator<T>,
    menus: MenuController<M>,
}

impl<S: KeyValueStore, T: TabApi, M: MenuApi> Background<S, T, M> {
    pub fn new(storage: S, tabs: T, menus: M) -> Self {
        Self {
            store: SettingsStore::new(storage),
            tabs: TabOrchestrator::new(tabs),
            menus: MenuController::new(menus),
        }
    }

    pub fn store(&self) -> &SettingsStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SettingsStore<S> {
        &mut self.store
    }

    pub fn tabs(&self) -> &TabOrchestrator<T> {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabOrchestrator<T> {
        &mut self.tabs
    }

    pub fn menus(&self) -> &MenuController<M> {
        &self.menus
    }

    /// Handles one event to completion.
    ///
    /// Only runtime messages produce a response. Failures on the other paths
    /// are logged and never escape.
    pub fn dispatch(&mut self, event: Event) -> Option<MessageResponse> {
        match event {
            Event::Installed => {
                report("install", self.refresh_menus());
                None
            }
            Event::MenuClicked {
                menu_item_id,
                selection_text,
            } => {
                report(
                    "menu click",
                    self.handle_menu_click(&menu_item_id, selection_text.as_deref()),
                );
                None
            }
            Event::Message(Message::SearchWord {
                word,
                dictionary_id,
            }) => Some(match self.handle_search_word(&word, dictionary_id.as_deref()) {
                Ok(_) => MessageResponse::ok(),
                Err(e) => {
                    warn!(error = %e, "searchWord failed");
                    MessageResponse::failure(e.to_string())
                }
            }),
            Event::Message(Message::RefreshMenus) => {
                report("refreshMenus", self.refresh_menus());
                Some(MessageResponse::ok())
            }
            Event::StorageChanged { area, key } => {
                if area == StorageArea::Local && key == SETTINGS_KEY {
                    report("settings change", self.refresh_menus());
                }
                None
            }
            Event::TabRemoved { tab_id } => {
                if let Some(dictionary_id) = self.tabs.on_tab_removed(tab_id) {
                    debug!(tab_id, dictionary = %dictionary_id, "stopped tracking closed tab");
                }
                None
            }
        }
    }

    /// Rebuilds the context menu from the current settings.
    pub fn refresh_menus(&mut self) -> Result<usize, DispatchError> {
        let settings = self.store.get_settings()?;
        Ok(self.menus.create_context_menus(&settings)?)
    }

    /// Handles a click on one of our context-menu entries.
    ///
    /// An empty selection or an id that is not a lookup entry does nothing.
    pub fn handle_menu_click(
        &mut self,
        menu_item_id: &str,
        selection: Option<&str>,
    ) -> Result<Vec<Lookup>, DispatchError> {
        let Some(word) = selection.map(str::trim).filter(|w| !w.is_empty()) else {
            return Ok(Vec::new());
        };
        let Some(target) = MenuTarget::from_menu_id(menu_item_id) else {
            return Ok(Vec::new());
        };

        let settings = self.store.get_settings()?;
        match target {
            MenuTarget::SearchAll => {
                let dictionaries: Vec<Dictionary> = settings.enabled_dictionaries().cloned().collect();
                let mut lookups = Vec::with_capacity(dictionaries.len());
                for dict in &dictionaries {
                    lookups.push(self.open_and_record(dict, word)?);
                }
                Ok(lookups)
            }
            MenuTarget::Dictionary(id) => {
                let dict = resolve_menu_dictionary(&settings, &id)
                    .cloned()
                    .ok_or(DispatchError::NoDictionary)?;
                self.store.capture_first_run_default(&dict.id)?;
                Ok(vec![self.open_and_record(&dict, word)?])
            }
        }
    }

    /// Handles a `searchWord` message from the popup.
    pub fn handle_search_word(
        &mut self,
        word: &str,
        dictionary_id: Option<&str>,
    ) -> Result<Lookup, DispatchError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(DispatchError::EmptyWord);
        }

        let settings = self.store.get_settings()?;
        let dict = resolve_message_dictionary(&settings, dictionary_id)
            .cloned()
            .ok_or(DispatchError::NoDictionary)?;
        self.store.capture_first_run_default(&dict.id)?;
        self.open_and_record(&dict, word)
    }

    fn open_and_record(&mut self, dict: &Dictionary, word: &str) -> Result<Lookup, DispatchError> {
        let behavior = self.store.get_tab_behavior()?;
        let tab_id = self.tabs.open_dictionary_tab(dict, word, behavior)?;
        let recorded = self.store.add_to_history(word, &dict.id)?;
        Ok(Lookup {
            dictionary_id: dict.id.clone(),
            tab_id,
            recorded,
        })
    }
}

fn report<T>(context: &str, result: Result<T, DispatchError>) {
    if let Err(e) = result {
        warn!(error = %e, "{} failed", context);
    }
}
