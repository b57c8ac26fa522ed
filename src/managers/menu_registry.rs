use crate::types::errors::MenuError;
use crate::types::menu::MenuItem;

/// The slice of the browser context-menus API the background service relies on.
pub trait MenuApi {
    fn remove_all(&mut self) -> Result<(), MenuError>;
    fn create(&mut self, item: MenuItem) -> Result<(), MenuError>;
}

/// In-process model of the registered context menu.
///
/// Mirrors the browser's rules: ids are unique and a parent must exist
/// before its children are created.
#[derive(Debug, Default)]
pub struct MenuRegistry {
    items: Vec<MenuItem>,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered items in creation order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn children_of(&self, parent_id: &str) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|i| i.parent_id.as_deref() == Some(parent_id))
            .collect()
    }
}

impl MenuApi for MenuRegistry {
    fn remove_all(&mut self) -> Result<(), MenuError> {
        self.items.clear();
        Ok(())
    }

    fn create(&mut self, item: MenuItem) -> Result<(), MenuError> {
        if self.get(&item.id).is_some() {
            return Err(MenuError::DuplicateId(item.id));
        }
        if let Some(parent) = item.parent_id.as_deref() {
            if self.get(parent).is_none() {
                return Err(MenuError::UnknownParent(parent.to_string()));
            }
        }
        self.items.push(item);
        Ok(())
    }
}
