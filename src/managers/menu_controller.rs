//! Menu Controller for Quick Define.
//!
//! The context menu is a view derived from the enabled dictionaries; it is
//! rebuilt from scratch whenever settings change.

use tracing::debug;

use crate::managers::menu_registry::MenuApi;
use crate::types::errors::MenuError;
use crate::types::menu::{MenuItem, MenuTarget, SEARCH_ALL_MENU_ID, SEARCH_ALL_MENU_TITLE};
use crate::types::settings::Settings;

pub struct MenuController<M: MenuApi> {
    menus: M,
}

impl<M: MenuApi> MenuController<M> {
    pub fn new(menus: M) -> Self {
        Self { menus }
    }

    pub fn menus(&self) -> &M {
        &self.menus
    }

    /// Clears every entry and recreates the tree for `settings`.
    ///
    /// Returns the number of per-dictionary entries created.
    pub fn create_context_menus(&mut self, settings: &Settings) -> Result<usize, MenuError> {
        self.menus.remove_all()?;
        self.menus.create(MenuItem::root())?;

        let mut count = 0;
        for dict in settings.enabled_dictionaries() {
            self.menus.create(MenuItem::child(
                MenuTarget::dictionary_menu_id(&dict.id),
                dict.name.clone(),
            ))?;
            count += 1;
        }

        if count > 1 {
            self.menus.create(MenuItem::separator())?;
            self.menus
                .create(MenuItem::child(SEARCH_ALL_MENU_ID, SEARCH_ALL_MENU_TITLE))?;
        }

        debug!(dictionaries = count, "context menus rebuilt");
        Ok(count)
    }
}
