//! RPC method handler for the Quick Define host protocol.
//!
//! Kept apart from `host_server.rs` so it can be unit-tested without stdio.
//! `handle_method` maps a JSON method call onto the settings store (popup and
//! options surfaces) or onto a background [`Event`] (browser callbacks).

use serde_json::{json, Value};

use crate::app::App;
use crate::dispatcher::Event;
use crate::managers::browser_tabs::TabApi;
use crate::services::settings_store::EXPORT_FILE_NAME;
use crate::types::dictionary::{DictionaryUpdate, NewDictionary};
use crate::types::message::Message;
use crate::types::settings::{Settings, TabBehavior, MAX_HISTORY_ENTRIES};

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn bool_param(params: &Value, name: &str) -> Result<bool, String> {
    params
        .get(name)
        .and_then(|v| v.as_bool())
        .ok_or_else(|| format!("missing {}", name))
}

/// Dispatch a method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// Calls that write settings are followed by a storage-change notification,
/// which rebuilds the context menu.
pub fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    let result = match method {
        "ping" => return Ok(json!({"pong": true})),

        // ─── Browser callbacks ───
        "runtime.installed" => {
            app.background.dispatch(Event::Installed);
            return Ok(json!({"ok": true}));
        }
        "runtime.message" => {
            let message: Message = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid message: {}", e))?;
            let response = app
                .background
                .dispatch(Event::Message(message))
                .ok_or("message produced no response")?;
            serde_json::to_value(response).map_err(|e| e.to_string())?
        }
        "contextMenu.click" => {
            let menu_item_id = str_param(params, "menuItemId")?.to_string();
            let selection_text = params
                .get("selectionText")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            app.background.dispatch(Event::MenuClicked {
                menu_item_id,
                selection_text,
            });
            json!({"ok": true})
        }
        "contextMenu.list" => {
            let items = app.background.menus().menus().items();
            return serde_json::to_value(items).map_err(|e| e.to_string());
        }
        "tabs.list" => {
            let tabs = app.background.tabs().tabs().get_all_tabs();
            return serde_json::to_value(tabs).map_err(|e| e.to_string());
        }
        "tabs.get" => {
            let tab_id = params.get("tabId").and_then(|v| v.as_i64()).ok_or("missing tabId")?;
            let tab = app.background.tabs().tabs().get(tab_id).map_err(|e| e.to_string())?;
            return serde_json::to_value(tab).map_err(|e| e.to_string());
        }
        "tabs.close" => {
            let tab_id = params.get("tabId").and_then(|v| v.as_i64()).ok_or("missing tabId")?;
            app.background
                .tabs_mut()
                .tabs_mut()
                .close_tab(tab_id)
                .map_err(|e| e.to_string())?;
            app.background.dispatch(Event::TabRemoved { tab_id });
            return Ok(json!({"ok": true}));
        }

        // ─── Settings ───
        "settings.get" => {
            let settings = app.background.store_mut().get_settings().map_err(|e| e.to_string())?;
            return serde_json::to_value(settings).map_err(|e| e.to_string());
        }
        "settings.save" => {
            let raw = params.get("settings").cloned().ok_or("missing settings")?;
            let settings: Settings =
                serde_json::from_value(raw).map_err(|e| format!("invalid settings: {}", e))?;
            app.background
                .store_mut()
                .save_settings(&settings)
                .map_err(|e| e.to_string())?;
            json!({"ok": true})
        }
        "settings.export" => {
            let text = app.background.store_mut().export_settings().map_err(|e| e.to_string())?;
            return Ok(json!({"filename": EXPORT_FILE_NAME, "json": text}));
        }
        "settings.import" => {
            let text = str_param(params, "json")?;
            app.background
                .store_mut()
                .import_settings(text)
                .map_err(|e| e.to_string())?;
            json!({"ok": true})
        }
        "settings.reset" => {
            app.background.store_mut().reset().map_err(|e| e.to_string())?;
            json!({"ok": true})
        }
        "settings.setDefault" => {
            let id = params.get("id").and_then(|v| v.as_str());
            app.background
                .store_mut()
                .set_default_dictionary(id)
                .map_err(|e| e.to_string())?;
            json!({"ok": true})
        }
        "settings.setFallback" => {
            let id = params.get("id").and_then(|v| v.as_str());
            app.background
                .store_mut()
                .set_fallback_dictionary(id)
                .map_err(|e| e.to_string())?;
            json!({"ok": true})
        }
        "settings.setTabBehavior" => {
            let raw = params.get("behavior").cloned().ok_or("missing behavior")?;
            let behavior: TabBehavior =
                serde_json::from_value(raw).map_err(|e| format!("invalid behavior: {}", e))?;
            app.background
                .store_mut()
                .set_tab_behavior(behavior)
                .map_err(|e| e.to_string())?;
            json!({"ok": true})
        }
        "settings.setHistoryEnabled" => {
            let enabled = bool_param(params, "enabled")?;
            app.background
                .store_mut()
                .set_history_enabled(enabled)
                .map_err(|e| e.to_string())?;
            json!({"ok": true})
        }

        // ─── Dictionaries ───
        "dictionary.list" => {
            let dictionaries = app.background.store_mut().get_dictionaries().map_err(|e| e.to_string())?;
            return serde_json::to_value(dictionaries).map_err(|e| e.to_string());
        }
        "dictionary.add" => {
            let input: NewDictionary = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid dictionary: {}", e))?;
            let dict = app
                .background
                .store_mut()
                .add_custom_dictionary(input)
                .map_err(|e| e.to_string())?;
            serde_json::to_value(dict).map_err(|e| e.to_string())?
        }
        "dictionary.update" => {
            let id = str_param(params, "id")?.to_string();
            let changes: DictionaryUpdate = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid dictionary: {}", e))?;
            let dict = app
                .background
                .store_mut()
                .update_dictionary(&id, changes)
                .map_err(|e| e.to_string())?;
            serde_json::to_value(dict).map_err(|e| e.to_string())?
        }
        "dictionary.setEnabled" => {
            let id = str_param(params, "id")?.to_string();
            let enabled = bool_param(params, "enabled")?;
            app.background
                .store_mut()
                .set_dictionary_enabled(&id, enabled)
                .map_err(|e| e.to_string())?;
            json!({"ok": true})
        }
        "dictionary.remove" => {
            let id = str_param(params, "id")?.to_string();
            let removed = app
                .background
                .store_mut()
                .remove_dictionary(&id)
                .map_err(|e| e.to_string())?;
            json!({"removed": removed})
        }
        "dictionary.reorder" => {
            let ids: Vec<String> = params
                .get("ids")
                .and_then(|v| v.as_array())
                .ok_or("missing ids")?
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            app.background
                .store_mut()
                .reorder_dictionaries(&ids)
                .map_err(|e| e.to_string())?;
            json!({"ok": true})
        }

        // ─── History ───
        "history.list" => {
            let limit = params
                .get("limit")
                .and_then(|v| v.as_u64())
                .map(|n| n as usize)
                .unwrap_or(MAX_HISTORY_ENTRIES);
            let entries = app
                .background
                .store_mut()
                .recent_history(limit)
                .map_err(|e| e.to_string())?;
            return serde_json::to_value(entries).map_err(|e| e.to_string());
        }
        "history.clear" => {
            app.background.store_mut().clear_history().map_err(|e| e.to_string())?;
            json!({"ok": true})
        }

        _ => return Err(format!("unknown method: {}", method)),
    };

    app.notify_settings_changed();
    Ok(result)
}
