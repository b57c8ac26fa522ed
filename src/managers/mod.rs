// Quick Define state managers
// Managers own the browser-facing state: tabs, tab tracking and context menus.

pub mod browser_tabs;
pub mod menu_controller;
pub mod menu_registry;
pub mod tab_orchestrator;
