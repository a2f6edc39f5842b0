use serde::{Deserialize, Serialize};

use crate::remote::MetadataRecord;

/// Unified per-document view model, one per tracked document.
///
/// Rebuilt wholesale on every aggregation pass; never patched in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub status: String,

    /// Humanized age of the last remote modification, or `"never"`.
    pub last_update: String,

    pub doc_url: String,

    /// Always `versions.len()`; recomputed, never stored independently.
    pub action_count: usize,

    /// Suffix of the first `slack:`-prefixed metadata tag, else empty.
    pub slack_channel_id: String,

    pub versions: Vec<ChannelVersion>,

    #[serde(default)]
    pub metadata: Option<MetadataRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelVersion {
    /// 1-based position in the fetched sequence. Not a server-assigned
    /// number; not stable across refetches if the server reorders.
    pub positional_version: u32,

    pub version_id: String,

    /// Raw timestamp as served.
    pub timestamp: String,

    /// Parsed epoch seconds, 0 when the timestamp does not parse.
    #[serde(default)]
    pub created_at_epoch: i64,

    pub chars_added: i64,
}

/// One flattened row of the history view, tagged with its owning document.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub doc_id: String,
    pub doc_name: String,
    pub positional_version: u32,
    pub version_id: String,
    pub timestamp: String,
    #[serde(default)]
    pub created_at_epoch: i64,
    pub chars_added: i64,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_messages: u64,
    pub active_documents: usize,
    pub total_versions: usize,
}
