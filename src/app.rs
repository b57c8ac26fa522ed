//! App Core for Quick Define.
//!
//! Wires the background service to its host-side collaborators: SQLite-backed
//! storage, the in-process tab strip and the context-menu registry.

use std::path::Path;

use crate::database::connection::Database;
use crate::dispatcher::{Background, Event, StorageArea};
use crate::managers::browser_tabs::BrowserTabs;
use crate::managers::menu_registry::MenuRegistry;
use crate::services::storage::{SqliteStore, SETTINGS_KEY};

/// Background service as run by the host binary.
pub type HostBackground = Background<SqliteStore, BrowserTabs, MenuRegistry>;

/// Central application struct owning the background service.
pub struct App {
    pub background: HostBackground,
}

impl App {
    /// Opens (or creates) the settings database at `db_path`.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(db_path)?;
        Ok(Self::with_database(db))
    }

    /// App over a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open_in_memory()?;
        Ok(Self::with_database(db))
    }

    fn with_database(db: Database) -> Self {
        Self {
            background: Background::new(SqliteStore::new(db), BrowserTabs::new(), MenuRegistry::new()),
        }
    }

    /// Startup sequence: the menu registry starts empty, so build it as on install.
    pub fn startup(&mut self) {
        self.background.dispatch(Event::Installed);
    }

    /// Delivers the storage-change notification that follows every settings write.
    pub fn notify_settings_changed(&mut self) {
        self.background.dispatch(Event::StorageChanged {
            area: StorageArea::Local,
            key: SETTINGS_KEY.to_string(),
        });
    }
}
