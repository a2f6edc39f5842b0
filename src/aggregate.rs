//! Aggregation engine: merges the document list, the metadata list, and
//! per-document version histories into one ordered channel collection.
//!
//! Network failures never escape this module. The two top-level listings
//! soft-degrade to empty; each per-document version fetch is isolated so one
//! failing document cannot disturb its siblings. Only genuine programming
//! errors propagate.

use std::collections::HashMap;

use anyhow::Result;
use futures::StreamExt;
use futures::stream;
use time::OffsetDateTime;

use crate::model::{Channel, ChannelVersion};
use crate::remote::{ApiClient, DocumentRecord, MetadataRecord, VersionRecord};
use crate::timefmt;

/// Upper bound on concurrent per-document version fetches when the config
/// does not override it.
pub const DEFAULT_FANOUT_LIMIT: usize = 8;

const SLACK_TAG_PREFIX: &str = "slack:";
const DOC_URL_BASE: &str = "https://docs.google.com/document/d/";

/// One full aggregation pass. `notes` carries human-readable lines for
/// soft-degraded fetches; they go to the scroll log, never the error state.
#[derive(Debug)]
pub struct Aggregate {
    pub channels: Vec<Channel>,
    pub notes: Vec<String>,
}

/// Build the channel collection for `folder_id` (or the whole mapping).
/// Output order equals the document list order; one channel per document
/// regardless of metadata or version availability.
pub async fn aggregate(
    client: &ApiClient,
    folder_id: Option<&str>,
    fanout: usize,
) -> Result<Aggregate> {
    let mut notes = Vec::new();

    let (docs_res, meta_res) = tokio::join!(
        client.list_documents(folder_id),
        client.all_metadata(folder_id),
    );

    let docs = match docs_res {
        Ok(resp) => resp.documents,
        Err(err) => {
            notes.push(format!("document list unavailable: {:#}", err));
            Vec::new()
        }
    };
    let metadata = match meta_res {
        Ok(resp) => resp.documents,
        Err(err) => {
            notes.push(format!("metadata list unavailable: {:#}", err));
            Vec::new()
        }
    };

    // Last write wins on duplicate doc_ids.
    let mut meta_by_doc: HashMap<String, MetadataRecord> = HashMap::new();
    for m in metadata {
        meta_by_doc.insert(m.doc_id.clone(), m);
    }

    // Bounded fan-out; `buffered` preserves input order, so results line up
    // with `docs` positionally.
    let version_results: Vec<(Vec<VersionRecord>, Option<String>)> =
        stream::iter(docs.iter().map(|doc| {
            let doc_id = doc.id.clone();
            async move {
                match client.list_versions(&doc_id).await {
                    Ok(resp) => (resp.versions, None),
                    Err(err) => (
                        Vec::new(),
                        Some(format!("versions for {} unavailable: {:#}", doc_id, err)),
                    ),
                }
            }
        }))
        .buffered(fanout.max(1))
        .collect()
        .await;

    let now = OffsetDateTime::now_utc();
    let mut channels = Vec::with_capacity(docs.len());
    for (doc, (versions, note)) in docs.iter().zip(version_results) {
        if let Some(note) = note {
            notes.push(note);
        }
        channels.push(build_channel(doc, meta_by_doc.get(&doc.id), versions, now));
    }

    Ok(Aggregate { channels, notes })
}

/// Synthesize one channel from its three independently-sourced records.
pub fn build_channel(
    doc: &DocumentRecord,
    meta: Option<&MetadataRecord>,
    versions: Vec<VersionRecord>,
    now: OffsetDateTime,
) -> Channel {
    let versions: Vec<ChannelVersion> = versions
        .into_iter()
        .enumerate()
        .map(|(i, v)| ChannelVersion {
            positional_version: (i + 1) as u32,
            created_at_epoch: timefmt::parse_epoch(&v.created_at),
            timestamp: v.created_at,
            version_id: v.version_id,
            chars_added: v.metadata.chars_added.unwrap_or(0),
        })
        .collect();

    Channel {
        id: doc.id.clone(),
        name: resolve_name(doc, meta),
        status: "active".to_string(),
        last_update: last_update(doc, now),
        doc_url: doc_url(&doc.id),
        action_count: versions.len(),
        slack_channel_id: slack_channel_from_tags(meta.map(|m| m.tags.as_slice()).unwrap_or(&[])),
        versions,
        metadata: meta.cloned(),
    }
}

/// Fallback order: metadata override, the document's own name, then a
/// placeholder from the first 8 characters of the id. Empty strings count
/// as absent.
pub fn resolve_name(doc: &DocumentRecord, meta: Option<&MetadataRecord>) -> String {
    if let Some(name) = meta.and_then(|m| m.name.as_deref()) {
        if !name.is_empty() {
            return name.to_string();
        }
    }
    if !doc.name.is_empty() {
        return doc.name.clone();
    }
    let short: String = doc.id.chars().take(8).collect();
    format!("Document {}", short)
}

/// Suffix of the first `slack:`-prefixed tag, empty when none matches.
pub fn slack_channel_from_tags(tags: &[String]) -> String {
    tags.iter()
        .find_map(|t| t.strip_prefix(SLACK_TAG_PREFIX))
        .unwrap_or("")
        .to_string()
}

pub fn doc_url(doc_id: &str) -> String {
    format!("{}{}", DOC_URL_BASE, doc_id)
}

fn last_update(doc: &DocumentRecord, now: OffsetDateTime) -> String {
    doc.modified_time
        .as_deref()
        .and_then(|ts| timefmt::time_ago_str(ts, now))
        .unwrap_or_else(|| "never".to_string())
}

#[cfg(test)]
#[path = "tests/aggregate/derive_tests.rs"]
mod tests;
