use serde::{Deserialize, Serialize};

/// One recorded lookup. `timestamp` is milliseconds since the UNIX epoch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub word: String,
    pub dictionary_id: String,
    pub timestamp: i64,
}
