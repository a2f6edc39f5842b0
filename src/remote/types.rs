//! DTOs and response envelopes for the pipeline API. Optional fields are
//! structurally optional here rather than presence-checked at use sites.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub(super) detail: String,
}

/// A tracked document as the pipeline's source store reports it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// RFC3339 when present; absent for documents never modified.
    #[serde(default)]
    pub modified_time: Option<String>,
}

/// Pipeline-side metadata for a document. Not every document has one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub doc_id: String,

    /// Optional display-name override.
    #[serde(default)]
    pub name: Option<String>,

    /// Ordered; a `slack:`-prefixed entry references the source channel.
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub folder_id: Option<String>,
}

/// One immutable edit version.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VersionRecord {
    pub version_id: String,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub metadata: VersionMeta,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VersionMeta {
    /// Absent counts as 0; negative means net deletion.
    #[serde(default)]
    pub chars_added: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentsResponse {
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
}

#[derive(Debug, Deserialize)]
pub struct MetadataAllResponse {
    #[serde(default)]
    pub documents: Vec<MetadataRecord>,

    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct VersionsResponse {
    pub doc_id: String,

    #[serde(default)]
    pub versions: Vec<VersionRecord>,
}

#[derive(Debug, Deserialize)]
pub struct MessageCountResponse {
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub service: String,

    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct TriggerResponse {
    pub status: String,
    pub doc_id: String,

    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RevertResponse {
    pub status: String,

    #[serde(default)]
    pub message: String,

    pub doc_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SyncMappingResponse {
    pub status: String,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub folder_id: Option<String>,

    #[serde(default)]
    pub document_count: u64,

    #[serde(default)]
    pub synced_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DriveMappingResponse {
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,

    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub results: Vec<DocumentRecord>,

    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CreateDocumentRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDocumentResponse {
    pub status: String,
    pub document: DocumentRecord,
}

#[derive(Debug, Serialize)]
pub struct UpdateMetadataRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusMessage {
    pub status: String,

    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentContentResponse {
    pub doc_id: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub metadata: Option<MetadataRecord>,
}
