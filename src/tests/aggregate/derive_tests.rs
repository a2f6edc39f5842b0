use super::*;

use crate::remote::VersionMeta;

fn doc(id: &str, name: &str) -> DocumentRecord {
    DocumentRecord {
        id: id.to_string(),
        name: name.to_string(),
        modified_time: None,
    }
}

fn meta(doc_id: &str, name: Option<&str>, tags: &[&str]) -> MetadataRecord {
    MetadataRecord {
        doc_id: doc_id.to_string(),
        name: name.map(str::to_string),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        description: None,
        folder_id: None,
    }
}

fn version(id: &str, created_at: &str, chars_added: Option<i64>) -> VersionRecord {
    VersionRecord {
        version_id: id.to_string(),
        created_at: created_at.to_string(),
        metadata: VersionMeta { chars_added },
    }
}

#[test]
fn name_prefers_metadata_override() {
    let d = doc("abc", "Drive name");
    let m = meta("abc", Some("Override"), &[]);
    assert_eq!(resolve_name(&d, Some(&m)), "Override");
}

#[test]
fn name_falls_back_to_document_name() {
    let d = doc("abc", "Drive name");
    assert_eq!(resolve_name(&d, None), "Drive name");
    // An empty override counts as absent.
    let m = meta("abc", Some(""), &[]);
    assert_eq!(resolve_name(&d, Some(&m)), "Drive name");
}

#[test]
fn name_placeholder_uses_first_eight_id_chars() {
    let d = doc("0123456789abcdef", "");
    assert_eq!(resolve_name(&d, None), "Document 01234567");
    let short = doc("xyz", "");
    assert_eq!(resolve_name(&short, None), "Document xyz");
}

#[test]
fn slack_tag_takes_first_match() {
    let tags: Vec<String> = ["x", "slack:C123", "y", "slack:C999"]
        .iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(slack_channel_from_tags(&tags), "C123");
}

#[test]
fn no_slack_tag_yields_empty() {
    let tags: Vec<String> = ["x", "y"].iter().map(|t| t.to_string()).collect();
    assert_eq!(slack_channel_from_tags(&tags), "");
    assert_eq!(slack_channel_from_tags(&[]), "");
}

#[test]
fn channel_versions_are_positional_and_default_chars() {
    let d = doc("abc", "Doc");
    let now = OffsetDateTime::now_utc();
    let c = build_channel(
        &d,
        None,
        vec![
            version("v-a", "2024-01-01T00:00:00Z", Some(10)),
            version("v-b", "2024-01-02T00:00:00Z", None),
            version("v-c", "bad-timestamp", Some(-4)),
        ],
        now,
    );

    assert_eq!(c.action_count, 3);
    assert_eq!(c.action_count, c.versions.len());

    assert_eq!(c.versions[0].positional_version, 1);
    assert_eq!(c.versions[1].positional_version, 2);
    assert_eq!(c.versions[2].positional_version, 3);

    assert_eq!(c.versions[0].chars_added, 10);
    assert_eq!(c.versions[1].chars_added, 0);
    assert_eq!(c.versions[2].chars_added, -4);

    assert!(c.versions[0].created_at_epoch > 0);
    assert_eq!(c.versions[2].created_at_epoch, 0);
}

#[test]
fn channel_without_modified_time_never_updated() {
    let d = doc("abc", "Doc");
    let c = build_channel(&d, None, Vec::new(), OffsetDateTime::now_utc());
    assert_eq!(c.last_update, "never");
    assert_eq!(c.status, "active");
    assert_eq!(c.doc_url, "https://docs.google.com/document/d/abc");
    assert_eq!(c.action_count, 0);
    assert!(c.metadata.is_none());
}

#[test]
fn channel_carries_raw_metadata() {
    let d = doc("abc", "Doc");
    let m = meta("abc", Some("Named"), &["slack:C42"]);
    let c = build_channel(&d, Some(&m), Vec::new(), OffsetDateTime::now_utc());
    assert_eq!(c.slack_channel_id, "C42");
    assert_eq!(c.metadata.as_ref().map(|m| m.doc_id.as_str()), Some("abc"));
}
