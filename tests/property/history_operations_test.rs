//! Property-based tests for search history recording.
//!
//! For any sequence of lookups, the history holds the most recent entries
//! first, never exceeds the cap, and stays empty while history is disabled.

use proptest::prelude::*;
use quickdefine::services::settings_store::SettingsStore;
use quickdefine::services::storage::MemoryStore;
use quickdefine::types::settings::MAX_HISTORY_ENTRIES;

fn arb_lookups() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(
        ("[a-z]{1,12}", prop_oneof![Just("oxford"), Just("cambridge"), Just("collins")])
            .prop_map(|(word, dict)| (word, dict.to_string())),
        0..(MAX_HISTORY_ENTRIES + 30),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn history_is_capped_and_most_recent_first(lookups in arb_lookups()) {
        let mut store = SettingsStore::new(MemoryStore::new());
        store.set_history_enabled(true).unwrap();

        for (word, dict) in &lookups {
            prop_assert!(store.add_to_history(word, dict).unwrap());
        }

        let history = store.get_search_history().unwrap();
        prop_assert_eq!(history.len(), lookups.len().min(MAX_HISTORY_ENTRIES));

        for (entry, (word, dict)) in history.iter().zip(lookups.iter().rev()) {
            prop_assert_eq!(&entry.word, word);
            prop_assert_eq!(&entry.dictionary_id, dict);
        }
        for pair in history.windows(2) {
            prop_assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[test]
    fn disabled_history_records_nothing(lookups in arb_lookups()) {
        let mut store = SettingsStore::new(MemoryStore::new());

        for (word, dict) in &lookups {
            prop_assert!(!store.add_to_history(word, dict).unwrap());
        }
        prop_assert!(store.get_search_history().unwrap().is_empty());
    }

    #[test]
    fn recent_history_is_a_prefix(lookups in arb_lookups(), limit in 0..120usize) {
        let mut store = SettingsStore::new(MemoryStore::new());
        store.set_history_enabled(true).unwrap();
        for (word, dict) in &lookups {
            store.add_to_history(word, dict).unwrap();
        }

        let all = store.get_search_history().unwrap();
        let recent = store.recent_history(limit).unwrap();
        prop_assert_eq!(recent.len(), all.len().min(limit));
        prop_assert_eq!(&recent[..], &all[..recent.len()]);
    }
}
