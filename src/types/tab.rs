use serde::{Deserialize, Serialize};

/// Browser-assigned tab identifier.
pub type TabId = i64;

/// A browser tab as seen by the background logic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub url: String,
    pub active: bool,
    pub created_at: i64,
}
