//! Mutation flows. Each operation performs its remote call and, on success,
//! re-runs a full aggregation pass so the caller receives a consistent
//! snapshot; there is no optimistic patching of the channel collection.
//!
//! Failures carry the server's detail message unmodified and skip the
//! re-aggregation. Outcomes are values for the presentation layer to render
//! as dismissible notices; nothing here blocks on acknowledgment.

use anyhow::Result;

use crate::aggregate::{self, Aggregate};
use crate::remote::ApiClient;

/// Success message for a completed mutation, paired with the fresh snapshot.
#[derive(Debug)]
pub struct MutationOutcome {
    pub message: String,
}

pub async fn force_update(
    client: &ApiClient,
    doc_id: &str,
    folder_id: Option<&str>,
    fanout: usize,
) -> Result<(MutationOutcome, Aggregate)> {
    let resp = client.trigger_update(doc_id).await?;
    let agg = aggregate::aggregate(client, folder_id, fanout).await?;
    let message = if resp.message.is_empty() {
        format!("update triggered for {}", resp.doc_id)
    } else {
        resp.message
    };
    Ok((MutationOutcome { message }, agg))
}

pub async fn revert_version(
    client: &ApiClient,
    doc_id: &str,
    positional: u32,
    version_id: Option<&str>,
    folder_id: Option<&str>,
    fanout: usize,
) -> Result<(MutationOutcome, Aggregate)> {
    let reference = version_ref(positional, version_id);
    let resp = client.revert(doc_id, &reference).await?;
    let agg = aggregate::aggregate(client, folder_id, fanout).await?;
    let message = if resp.message.is_empty() {
        format!("{} reverted to {}", resp.doc_id, reference)
    } else {
        resp.message
    };
    Ok((MutationOutcome { message }, agg))
}

pub async fn resync_folder(
    client: &ApiClient,
    folder_id: Option<&str>,
    fanout: usize,
) -> Result<(MutationOutcome, Aggregate)> {
    let resp = client.sync_mapping(folder_id).await?;
    let agg = aggregate::aggregate(client, folder_id, fanout).await?;
    Ok((
        MutationOutcome {
            message: format!("folder synced ({} documents)", resp.document_count),
        },
        agg,
    ))
}

/// The identifier sent to the revert endpoint: the opaque token when one
/// exists, the positional number only as a fallback.
pub fn version_ref(positional: u32, version_id: Option<&str>) -> String {
    match version_id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => positional.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/reconcile/version_ref_tests.rs"]
mod tests;
