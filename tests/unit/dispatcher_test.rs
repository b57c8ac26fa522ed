//! Unit tests for the background dispatcher: menu clicks, runtime messages,
//! storage changes and tab removal driven through `Background::dispatch`.

use quickdefine::dispatcher::{Background, Event, StorageArea};
use quickdefine::managers::browser_tabs::{BrowserTabs, TabApi};
use quickdefine::managers::menu_registry::MenuRegistry;
use quickdefine::services::storage::MemoryStore;
use quickdefine::types::dictionary::Dictionary;
use quickdefine::types::errors::DispatchError;
use quickdefine::types::menu::{ROOT_MENU_ID, SEARCH_ALL_MENU_ID};
use quickdefine::types::message::{Message, MessageResponse};
use quickdefine::types::settings::{Settings, TabBehavior};

type TestBackground = Background<MemoryStore, BrowserTabs, MenuRegistry>;

fn background() -> TestBackground {
    Background::new(MemoryStore::new(), BrowserTabs::new(), MenuRegistry::new())
}

fn dict(id: &str, enabled: bool) -> Dictionary {
    Dictionary {
        id: id.to_string(),
        name: id.to_uppercase(),
        url: format!("https://{}.test/?q={{word}}", id),
        icon: None,
        enabled,
        builtin: false,
    }
}

fn background_with(dictionaries: Vec<Dictionary>) -> TestBackground {
    let mut bg = background();
    bg.store_mut()
        .save_settings(&Settings {
            dictionaries,
            ..Settings::default()
        })
        .unwrap();
    bg
}

fn search(word: &str, dictionary_id: Option<&str>) -> Event {
    Event::Message(Message::SearchWord {
        word: word.to_string(),
        dictionary_id: dictionary_id.map(str::to_string),
    })
}

fn click(menu_item_id: &str, selection: Option<&str>) -> Event {
    Event::MenuClicked {
        menu_item_id: menu_item_id.to_string(),
        selection_text: selection.map(str::to_string),
    }
}

fn tab_urls(bg: &TestBackground) -> Vec<String> {
    bg.tabs().tabs().get_all_tabs().iter().map(|t| t.url.clone()).collect()
}

// --- Install and storage changes ---

#[test]
fn test_installed_builds_menu() {
    let mut bg = background();
    assert_eq!(bg.dispatch(Event::Installed), None);
    assert!(bg.menus().menus().get(ROOT_MENU_ID).is_some());
    assert!(bg.menus().menus().get(SEARCH_ALL_MENU_ID).is_some());
}

#[test]
fn test_settings_change_rebuilds_menu() {
    let mut bg = background();
    bg.dispatch(Event::Installed);
    bg.store_mut().set_dictionary_enabled("oxford", false).unwrap();

    bg.dispatch(Event::StorageChanged {
        area: StorageArea::Local,
        key: "settings".to_string(),
    });
    assert!(bg.menus().menus().get("dict-oxford").is_none());
    assert!(bg.menus().menus().get("dict-cambridge").is_some());
}

#[test]
fn test_unrelated_storage_change_ignored() {
    let mut bg = background();
    bg.dispatch(Event::Installed);
    bg.store_mut().set_dictionary_enabled("oxford", false).unwrap();

    bg.dispatch(Event::StorageChanged {
        area: StorageArea::Sync,
        key: "settings".to_string(),
    });
    bg.dispatch(Event::StorageChanged {
        area: StorageArea::Local,
        key: "other".to_string(),
    });
    assert!(bg.menus().menus().get("dict-oxford").is_some(), "menu should be unchanged");
}

#[test]
fn test_refresh_menus_message_responds_ok() {
    let mut bg = background();
    assert_eq!(
        bg.dispatch(Event::Message(Message::RefreshMenus)),
        Some(MessageResponse::ok())
    );
    assert!(bg.menus().menus().get(ROOT_MENU_ID).is_some());
}

// --- searchWord messages ---

#[test]
fn test_search_word_uses_first_enabled_dictionary() {
    let mut bg = background_with(vec![dict("b", false), dict("a", true)]);
    assert_eq!(bg.dispatch(search("hello", None)), Some(MessageResponse::ok()));
    assert_eq!(tab_urls(&bg), vec!["https://a.test/?q=hello"]);
}

#[test]
fn test_search_word_first_run_captures_default() {
    let mut bg = background_with(vec![dict("a", true), dict("b", false)]);
    let response = bg.dispatch(search("test", None)).unwrap();
    assert!(response.success);

    let settings = bg.store_mut().get_settings().unwrap();
    assert_eq!(settings.default_dictionary.as_deref(), Some("a"));
    assert!(!settings.first_run);
    assert_eq!(tab_urls(&bg), vec!["https://a.test/?q=test"]);
}

#[test]
fn test_search_word_explicit_dictionary() {
    let mut bg = background();
    bg.dispatch(search("word", Some("wiktionary")));
    assert_eq!(tab_urls(&bg), vec!["https://en.wiktionary.org/wiki/word"]);
}

#[test]
fn test_search_word_unknown_dictionary_fails() {
    let mut bg = background();
    let response = bg.dispatch(search("word", Some("missing"))).unwrap();
    assert_eq!(response, MessageResponse::failure("No dictionary available"));
    assert!(tab_urls(&bg).is_empty());
}

#[test]
fn test_search_word_all_disabled_fails() {
    let mut bg = background_with(vec![dict("a", false), dict("b", false)]);
    let response = bg.dispatch(search("word", None)).unwrap();
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("No dictionary available"));
}

#[test]
fn test_search_word_blank_word_fails() {
    let mut bg = background();
    let response = bg.dispatch(search("   ", None)).unwrap();
    assert_eq!(response, MessageResponse::failure("No word provided"));
    assert!(matches!(bg.handle_search_word("", None), Err(DispatchError::EmptyWord)));
}

#[test]
fn test_search_word_records_history_when_enabled() {
    let mut bg = background_with(vec![dict("a", true)]);
    bg.store_mut().set_history_enabled(true).unwrap();

    let lookup = bg.handle_search_word("  pneumonia ", None).unwrap();
    assert!(lookup.recorded);
    assert_eq!(lookup.dictionary_id, "a");

    let history = bg.store_mut().get_search_history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].word, "pneumonia");
    assert_eq!(history[0].dictionary_id, "a");
}

#[test]
fn test_blank_default_still_captures_on_first_lookup() {
    let mut bg = background();
    bg.store_mut().set_default_dictionary(Some("")).unwrap();
    assert_eq!(bg.store_mut().get_settings().unwrap().default_dictionary, None);

    let lookup = bg.handle_search_word("test", None).unwrap();
    assert_eq!(lookup.dictionary_id, "merriam-webster");

    let settings = bg.store_mut().get_settings().unwrap();
    assert_eq!(settings.default_dictionary.as_deref(), Some("merriam-webster"));
    assert!(!settings.first_run);
}

#[test]
fn test_empty_default_in_stored_record_still_captures() {
    let mut bg = background_with(vec![dict("a", true), dict("b", true)]);
    let mut settings = bg.store_mut().get_settings().unwrap();
    settings.default_dictionary = Some(String::new());
    bg.store_mut().save_settings(&settings).unwrap();

    let lookup = bg.handle_search_word("test", None).unwrap();
    assert_eq!(lookup.dictionary_id, "a");

    let settings = bg.store_mut().get_settings().unwrap();
    assert_eq!(settings.default_dictionary.as_deref(), Some("a"));
    assert!(!settings.first_run);
}

// --- Menu clicks ---

#[test]
fn test_menu_click_records_trimmed_selection() {
    let mut bg = background_with(vec![dict("a", true)]);
    bg.store_mut().set_history_enabled(true).unwrap();

    bg.dispatch(click("dict-a", Some("\n  lexicon \t")));
    assert_eq!(tab_urls(&bg), vec!["https://a.test/?q=lexicon"]);

    let history = bg.store_mut().get_search_history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].word, "lexicon");
}

#[test]
fn test_menu_click_opens_clicked_dictionary() {
    let mut bg = background_with(vec![dict("a", true), dict("b", true)]);
    let lookups = bg.handle_menu_click("dict-b", Some("café")).unwrap();
    assert_eq!(lookups.len(), 1);
    assert_eq!(lookups[0].dictionary_id, "b");
    assert_eq!(tab_urls(&bg), vec!["https://b.test/?q=caf%C3%A9"]);

    let settings = bg.store_mut().get_settings().unwrap();
    assert_eq!(settings.default_dictionary.as_deref(), Some("b"));
}

#[test]
fn test_menu_click_disabled_uses_fallback() {
    let mut bg = background_with(vec![dict("a", false), dict("b", true)]);
    bg.store_mut().set_fallback_dictionary(Some("b")).unwrap();

    let lookups = bg.handle_menu_click("dict-a", Some("word")).unwrap();
    assert_eq!(lookups[0].dictionary_id, "b");
}

#[test]
fn test_menu_click_without_fallback_opens_nothing() {
    let mut bg = background_with(vec![dict("a", false), dict("b", true)]);
    assert!(matches!(
        bg.handle_menu_click("dict-a", Some("word")),
        Err(DispatchError::NoDictionary)
    ));
    assert_eq!(bg.dispatch(click("dict-a", Some("word"))), None);
    assert!(tab_urls(&bg).is_empty());
}

#[test]
fn test_menu_click_empty_selection_is_noop() {
    let mut bg = background();
    assert!(bg.handle_menu_click("dict-oxford", None).unwrap().is_empty());
    assert!(bg.handle_menu_click("dict-oxford", Some("  ")).unwrap().is_empty());
    assert!(tab_urls(&bg).is_empty());
    assert!(bg.store_mut().is_first_run().unwrap());
}

#[test]
fn test_menu_click_root_or_separator_is_noop() {
    let mut bg = background();
    assert!(bg.handle_menu_click(ROOT_MENU_ID, Some("w")).unwrap().is_empty());
    assert!(bg.handle_menu_click("separator", Some("w")).unwrap().is_empty());
    assert!(tab_urls(&bg).is_empty());
}

#[test]
fn test_search_all_opens_every_enabled_dictionary_in_order() {
    let mut bg = background_with(vec![dict("a", true), dict("b", false), dict("c", true)]);
    bg.store_mut().set_history_enabled(true).unwrap();

    bg.dispatch(click(SEARCH_ALL_MENU_ID, Some("tree")));
    assert_eq!(
        tab_urls(&bg),
        vec!["https://a.test/?q=tree", "https://c.test/?q=tree"]
    );

    let history = bg.store_mut().get_search_history().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].dictionary_id, "c");
    assert_eq!(history[1].dictionary_id, "a");

    // Search-all never captures a first-run default.
    assert!(bg.store_mut().is_first_run().unwrap());
}

// --- Tab reuse through the dispatcher ---

#[test]
fn test_reuse_mode_reuses_tab_across_lookups() {
    let mut bg = background_with(vec![dict("a", true)]);
    bg.store_mut().set_tab_behavior(TabBehavior::Reuse).unwrap();

    let first = bg.handle_search_word("one", Some("a")).unwrap();
    let second = bg.handle_search_word("two", Some("a")).unwrap();
    assert_eq!(first.tab_id, second.tab_id);
    assert_eq!(tab_urls(&bg), vec!["https://a.test/?q=two"]);
}

#[test]
fn test_reuse_mode_after_user_closes_tab() {
    let mut bg = background_with(vec![dict("a", true)]);
    bg.store_mut().set_tab_behavior(TabBehavior::Reuse).unwrap();

    let first = bg.handle_search_word("one", Some("a")).unwrap();
    bg.tabs_mut().tabs_mut().close_tab(first.tab_id).unwrap();

    let second = bg.handle_search_word("two", Some("a")).unwrap();
    assert_ne!(first.tab_id, second.tab_id);
    assert_eq!(bg.tabs().tracked_tab("a"), Some(second.tab_id));
    assert_eq!(bg.tabs().tracked_count(), 1);
}

#[test]
fn test_tab_removed_event_drops_tracking() {
    let mut bg = background_with(vec![dict("a", true)]);
    bg.store_mut().set_tab_behavior(TabBehavior::Reuse).unwrap();

    let lookup = bg.handle_search_word("one", Some("a")).unwrap();
    bg.tabs_mut().tabs_mut().close_tab(lookup.tab_id).unwrap();
    assert_eq!(bg.dispatch(Event::TabRemoved { tab_id: lookup.tab_id }), None);
    assert_eq!(bg.tabs().tracked_tab("a"), None);

    let next = bg.handle_search_word("two", Some("a")).unwrap();
    assert!(bg.tabs().tabs().get(next.tab_id).is_ok());
}

#[test]
fn test_new_mode_opens_tab_per_lookup() {
    let mut bg = background_with(vec![dict("a", true)]);
    bg.handle_search_word("one", None).unwrap();
    bg.handle_search_word("two", None).unwrap();
    assert_eq!(bg.tabs().tabs().tab_count(), 2);
}
