//! Tab Orchestrator for Quick Define.
//!
//! Opens a lookup tab per dictionary and, in reuse mode, navigates the tab it
//! opened last time instead. The dictionary → tab mapping lives here, scoped
//! to this instance, and is never persisted.

use std::collections::BTreeMap;

use tracing::debug;

use crate::managers::browser_tabs::TabApi;
use crate::services::url_builder::build_search_url;
use crate::types::dictionary::Dictionary;
use crate::types::errors::TabError;
use crate::types::settings::TabBehavior;
use crate::types::tab::TabId;

pub struct TabOrchestrator<T: TabApi> {
    tabs: T,
    tracked: BTreeMap<String, TabId>,
}

impl<T: TabApi> TabOrchestrator<T> {
    pub fn new(tabs: T) -> Self {
        Self {
            tabs,
            tracked: BTreeMap::new(),
        }
    }

    pub fn tabs(&self) -> &T {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut T {
        &mut self.tabs
    }

    /// Tab last opened for `dictionary_id`, if still tracked.
    pub fn tracked_tab(&self, dictionary_id: &str) -> Option<TabId> {
        self.tracked.get(dictionary_id).copied()
    }

    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Opens `word` in `dictionary` and returns the tab used.
    ///
    /// With `TabBehavior::Reuse`, a tracked tab that still exists is navigated
    /// and activated. A tracked tab that can no longer be fetched or navigated
    /// is forgotten and a new tab is created in its place.
    pub fn open_dictionary_tab(
        &mut self,
        dictionary: &Dictionary,
        word: &str,
        behavior: TabBehavior,
    ) -> Result<TabId, TabError> {
        let url = build_search_url(&dictionary.url, word);

        if behavior == TabBehavior::Reuse {
            if let Some(tab_id) = self.tracked_tab(&dictionary.id) {
                let navigated = self
                    .tabs
                    .get(tab_id)
                    .and_then(|tab| self.tabs.update(tab.id, &url, true));
                match navigated {
                    Ok(()) => return Ok(tab_id),
                    Err(e) => {
                        debug!(dictionary = %dictionary.id, tab_id, error = %e, "tracked tab unavailable; opening a new one");
                        self.tracked.remove(&dictionary.id);
                    }
                }
            }
        }

        let tab_id = self.tabs.create(&url)?;
        self.tracked.insert(dictionary.id.clone(), tab_id);
        Ok(tab_id)
    }

    /// Forgets the dictionary tracked on a closed tab. Returns the dictionary id
    /// that was dropped, if any. At most one entry is removed.
    pub fn on_tab_removed(&mut self, tab_id: TabId) -> Option<String> {
        let dictionary_id = self
            .tracked
            .iter()
            .find(|(_, tracked)| **tracked == tab_id)
            .map(|(id, _)| id.clone())?;
        self.tracked.remove(&dictionary_id);
        Some(dictionary_id)
    }

    /// Drops all tracking, as after a background restart.
    pub fn clear_tracking(&mut self) {
        self.tracked.clear();
    }
}
