use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::errors::TabError;
use crate::types::tab::{Tab, TabId};

/// The slice of the browser tabs API the background service relies on.
pub trait TabApi {
    /// Fetches a tab; fails with `TabError::NotFound` once it has been closed.
    fn get(&self, tab_id: TabId) -> Result<Tab, TabError>;
    /// Navigates an existing tab and optionally activates it.
    fn update(&mut self, tab_id: TabId, url: &str, active: bool) -> Result<(), TabError>;
    /// Opens a new active tab and returns its id.
    fn create(&mut self, url: &str) -> Result<TabId, TabError>;
}

/// In-process model of the browser's tab strip.
pub struct BrowserTabs {
    tabs: Vec<Tab>,
    tab_order: Vec<TabId>,
    active_tab_id: Option<TabId>,
    next_id: TabId,
}

impl BrowserTabs {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            tab_order: Vec::new(),
            active_tab_id: None,
            next_id: 1,
        }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn find_tab_index(&self, tab_id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    fn set_active(&mut self, tab_id: Option<TabId>) {
        self.active_tab_id = tab_id;
        for tab in &mut self.tabs {
            tab.active = Some(tab.id) == tab_id;
        }
    }

    /// Opens a tab at `url`. Ids are never reused within a session.
    pub fn create_tab(&mut self, url: &str, active: bool) -> TabId {
        let id = self.next_id;
        self.next_id += 1;
        self.tabs.push(Tab {
            id,
            url: url.to_string(),
            active: false,
            created_at: Self::now(),
        });
        self.tab_order.push(id);
        if active || self.active_tab_id.is_none() {
            self.set_active(Some(id));
        }
        id
    }

    /// Closes a tab. If it was active, its nearest neighbor becomes active.
    pub fn close_tab(&mut self, tab_id: TabId) -> Result<(), TabError> {
        let tab_idx = self.find_tab_index(tab_id).ok_or(TabError::NotFound(tab_id))?;
        let order_idx = self
            .tab_order
            .iter()
            .position(|id| *id == tab_id)
            .ok_or(TabError::NotFound(tab_id))?;

        let need_switch = self.active_tab_id == Some(tab_id);
        self.tabs.remove(tab_idx);
        self.tab_order.remove(order_idx);

        if need_switch {
            let next = if self.tab_order.is_empty() {
                None
            } else {
                Some(self.tab_order[order_idx.min(self.tab_order.len() - 1)])
            };
            self.set_active(next);
        }
        Ok(())
    }

    pub fn switch_tab(&mut self, tab_id: TabId) -> Result<(), TabError> {
        if self.find_tab_index(tab_id).is_none() {
            return Err(TabError::NotFound(tab_id));
        }
        self.set_active(Some(tab_id));
        Ok(())
    }

    pub fn get_tab(&self, tab_id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    /// Tabs in strip order.
    pub fn get_all_tabs(&self) -> Vec<&Tab> {
        self.tab_order
            .iter()
            .filter_map(|id| self.tabs.iter().find(|t| t.id == *id))
            .collect()
    }

    pub fn get_active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.and_then(|id| self.get_tab(id))
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }
}

impl Default for BrowserTabs {
    fn default() -> Self {
        Self::new()
    }
}

impl TabApi for BrowserTabs {
    fn get(&self, tab_id: TabId) -> Result<Tab, TabError> {
        self.get_tab(tab_id).cloned().ok_or(TabError::NotFound(tab_id))
    }

    fn update(&mut self, tab_id: TabId, url: &str, active: bool) -> Result<(), TabError> {
        let tab = self
            .tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .ok_or(TabError::NotFound(tab_id))?;
        tab.url = url.to_string();
        if active {
            self.set_active(Some(tab_id));
        }
        Ok(())
    }

    fn create(&mut self, url: &str) -> Result<TabId, TabError> {
        Ok(self.create_tab(url, true))
    }
}
