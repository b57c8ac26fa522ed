use thiserror::Error;

use super::tab::TabId;

// === StorageError ===

/// Errors raised by a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying database rejected the operation.
    #[error("Storage database error: {0}")]
    Database(String),
    /// A stored value could not be encoded or decoded.
    #[error("Storage serialization error: {0}")]
    Serialization(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

// === StoreError ===

/// Errors related to reading and mutating the settings record.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The persisted record exists but does not describe settings.
    #[error("Corrupt settings record: {0}")]
    Corrupt(String),
    /// An imported document was rejected; the store was left untouched.
    #[error("Invalid settings file: {0}")]
    InvalidImport(String),
    /// User input for a custom dictionary failed validation.
    #[error("Invalid dictionary: {0}")]
    InvalidDictionary(String),
    #[error("Dictionary not found: {0}")]
    DictionaryNotFound(String),
    /// Built-in dictionaries can be disabled but never removed.
    #[error("Built-in dictionary cannot be removed: {0}")]
    BuiltinDictionary(String),
}

// === TabError ===

/// Errors related to browser tab operations.
#[derive(Debug, Error)]
pub enum TabError {
    /// Tab with the given ID does not exist (or no longer exists).
    #[error("Tab not found: {0}")]
    NotFound(TabId),
    /// The browser refused the tab operation.
    #[error("Tab operation failed: {0}")]
    Browser(String),
}

// === MenuError ===

/// Errors related to context-menu registration.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Duplicate menu item id: {0}")]
    DuplicateId(String),
    #[error("Unknown parent menu item: {0}")]
    UnknownParent(String),
}

// === DispatchError ===

/// Errors surfaced by the request dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No dictionary could be resolved for a lookup (empty list, all disabled, or unknown id).
    #[error("No dictionary available")]
    NoDictionary,
    #[error("No word provided")]
    EmptyWord,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Tab(#[from] TabError),
    #[error(transparent)]
    Menu(#[from] MenuError),
}
