//! Property-based tests for settings persistence.
//!
//! For any valid settings object, saving then loading yields the same object,
//! and exporting then importing into a fresh store reproduces it exactly.

use proptest::prelude::*;
use quickdefine::database::Database;
use quickdefine::services::settings_store::SettingsStore;
use quickdefine::services::storage::{MemoryStore, SqliteStore};
use quickdefine::types::dictionary::Dictionary;
use quickdefine::types::history::HistoryEntry;
use quickdefine::types::settings::{Settings, TabBehavior, MAX_HISTORY_ENTRIES};

fn arb_dictionary() -> impl Strategy<Value = Dictionary> {
    (
        "[a-z][a-z0-9-]{1,12}",
        "[A-Z][a-zA-Z ]{1,20}",
        "[a-z]{3,10}",
        proptest::option::of("https://[a-z]{3,8}\\.test/icon\\.png"),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(id, name, host, icon, enabled, builtin)| Dictionary {
            url: format!("https://{}.test/?q={{word}}", host),
            id,
            name,
            icon,
            enabled,
            builtin,
        })
}

fn arb_history_entry() -> impl Strategy<Value = HistoryEntry> {
    ("\\PC{1,20}", "[a-z-]{2,12}", 0i64..4_000_000_000_000i64).prop_map(
        |(word, dictionary_id, timestamp)| HistoryEntry {
            word,
            dictionary_id,
            timestamp,
        },
    )
}

fn arb_settings() -> impl Strategy<Value = Settings> {
    (
        proptest::option::of("[a-z-]{2,12}"),
        proptest::option::of("[a-z-]{2,12}"),
        prop_oneof![Just(TabBehavior::New), Just(TabBehavior::Reuse)],
        any::<bool>(),
        any::<bool>(),
        prop::collection::vec(arb_dictionary(), 0..8),
        prop::collection::vec(arb_history_entry(), 0..MAX_HISTORY_ENTRIES),
    )
        .prop_map(
            |(default_dictionary, fallback_dictionary, tab_behavior, history_enabled, first_run, dictionaries, search_history)| {
                Settings {
                    default_dictionary,
                    fallback_dictionary,
                    tab_behavior,
                    history_enabled,
                    first_run,
                    dictionaries,
                    search_history,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn save_then_load_returns_same_settings(settings in arb_settings()) {
        let db = Database::open_in_memory().expect("Failed to open in-memory DB");
        let mut store = SettingsStore::new(SqliteStore::new(db));

        store.save_settings(&settings).expect("save_settings should succeed");
        let loaded = store.get_settings().expect("get_settings should succeed");
        prop_assert_eq!(loaded, settings);
    }

    #[test]
    fn export_then_import_reproduces_settings(settings in arb_settings()) {
        let mut source = SettingsStore::new(MemoryStore::new());
        source.save_settings(&settings).unwrap();
        let exported = source.export_settings().unwrap();

        let mut target = SettingsStore::new(MemoryStore::new());
        target.import_settings(&exported).unwrap();
        prop_assert_eq!(target.get_settings().unwrap(), settings);
    }

    #[test]
    fn reorder_is_a_permutation(settings in arb_settings(), picks in prop::collection::vec(0..8usize, 0..8)) {
        let mut store = SettingsStore::new(MemoryStore::new());
        store.save_settings(&settings).unwrap();

        let ids: Vec<String> = picks
            .iter()
            .filter_map(|i| settings.dictionaries.get(*i).map(|d| d.id.clone()))
            .collect();
        store.reorder_dictionaries(&ids).unwrap();

        let mut before: Vec<Dictionary> = settings.dictionaries.clone();
        let mut after = store.get_dictionaries().unwrap();
        prop_assert_eq!(after.len(), before.len());
        before.sort_by_key(|d| format!("{:?}", d));
        after.sort_by_key(|d| format!("{:?}", d));
        prop_assert_eq!(after, before);
    }
}
