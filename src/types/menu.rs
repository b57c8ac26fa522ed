use serde::{Deserialize, Serialize};

/// Id of the top-level "Search Dictionary" entry.
pub const ROOT_MENU_ID: &str = "search-dictionary";
/// Prefix put in front of a dictionary id to form its menu item id.
pub const DICTIONARY_MENU_PREFIX: &str = "dict-";
pub const SEPARATOR_MENU_ID: &str = "separator";
pub const SEARCH_ALL_MENU_ID: &str = "search-all";

pub const ROOT_MENU_TITLE: &str = "Search Dictionary";
pub const SEARCH_ALL_MENU_TITLE: &str = "Search All Dictionaries";

/// Page context in which a menu item is shown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MenuContext {
    Selection,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MenuItemKind {
    Normal,
    Separator,
}

/// A context-menu entry as registered with the browser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub parent_id: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: MenuItemKind,
    pub contexts: Vec<MenuContext>,
}

impl MenuItem {
    /// The root entry, shown when text is selected.
    pub fn root() -> Self {
        Self {
            id: ROOT_MENU_ID.to_string(),
            parent_id: None,
            title: Some(ROOT_MENU_TITLE.to_string()),
            kind: MenuItemKind::Normal,
            contexts: vec![MenuContext::Selection],
        }
    }

    pub fn child(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: Some(ROOT_MENU_ID.to_string()),
            title: Some(title.into()),
            kind: MenuItemKind::Normal,
            contexts: vec![MenuContext::Selection],
        }
    }

    pub fn separator() -> Self {
        Self {
            id: SEPARATOR_MENU_ID.to_string(),
            parent_id: Some(ROOT_MENU_ID.to_string()),
            title: None,
            kind: MenuItemKind::Separator,
            contexts: vec![MenuContext::Selection],
        }
    }
}

/// What a clicked menu item id refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuTarget {
    SearchAll,
    Dictionary(String),
}

impl MenuTarget {
    /// Parses a clicked menu item id. Returns `None` for ids that trigger no lookup
    /// (the root entry, the separator, foreign ids).
    pub fn from_menu_id(menu_item_id: &str) -> Option<Self> {
        if menu_item_id == SEARCH_ALL_MENU_ID {
            return Some(MenuTarget::SearchAll);
        }
        menu_item_id
            .strip_prefix(DICTIONARY_MENU_PREFIX)
            .map(|id| MenuTarget::Dictionary(id.to_string()))
    }

    pub fn dictionary_menu_id(dictionary_id: &str) -> String {
        format!("{}{}", DICTIONARY_MENU_PREFIX, dictionary_id)
    }
}
