use super::*;

use crate::model::ChannelVersion;

fn channel(id: &str, name: &str, versions: &[(&str, i64)]) -> Channel {
    let versions: Vec<ChannelVersion> = versions
        .iter()
        .enumerate()
        .map(|(i, (vid, epoch))| ChannelVersion {
            positional_version: (i + 1) as u32,
            version_id: vid.to_string(),
            timestamp: format!("t{}", epoch),
            created_at_epoch: *epoch,
            chars_added: 1,
        })
        .collect();
    Channel {
        id: id.to_string(),
        name: name.to_string(),
        status: "active".to_string(),
        last_update: "never".to_string(),
        doc_url: format!("https://docs.google.com/document/d/{}", id),
        action_count: versions.len(),
        slack_channel_id: String::new(),
        versions,
        metadata: None,
    }
}

fn agg(channels: Vec<Channel>) -> Aggregate {
    Aggregate {
        channels,
        notes: Vec::new(),
    }
}

#[test]
fn initial_refresh_raises_loading_once() {
    let mut dash = Dashboard::new();
    assert!(!dash.loading);

    let g = dash.begin_refresh();
    assert!(dash.loading);
    assert!(dash.refreshing);

    assert!(dash.apply_refresh(g, Ok(agg(vec![channel("a", "A", &[])]))));
    assert!(!dash.loading);
    assert!(!dash.refreshing);

    // Later passes refresh without re-entering the loading state.
    dash.begin_refresh();
    assert!(!dash.loading);
    assert!(dash.refreshing);
}

#[test]
fn stale_generation_is_discarded() {
    let mut dash = Dashboard::new();
    let older = dash.begin_refresh();
    let newer = dash.begin_refresh();

    assert!(dash.apply_refresh(newer, Ok(agg(vec![channel("new", "New", &[])]))));
    assert!(!dash.apply_refresh(older, Ok(agg(vec![channel("old", "Old", &[])]))));

    assert_eq!(dash.channels().len(), 1);
    assert_eq!(dash.channels()[0].id, "new");
}

#[test]
fn failure_sets_error_and_discards_channels() {
    let mut dash = Dashboard::new();
    let g = dash.begin_refresh();
    dash.apply_refresh(g, Ok(agg(vec![channel("a", "A", &[])])));
    assert_eq!(dash.channels().len(), 1);

    let g = dash.begin_refresh();
    dash.apply_refresh(g, Err(anyhow::anyhow!("boom")));
    assert!(dash.error.as_deref().unwrap().contains("boom"));
    assert!(dash.channels().is_empty());

    // A later success clears the error again.
    let g = dash.begin_refresh();
    dash.apply_refresh(g, Ok(agg(vec![channel("a", "A", &[])])));
    assert!(dash.error.is_none());
}

#[test]
fn notes_land_in_the_log() {
    let mut dash = Dashboard::new();
    let g = dash.begin_refresh();
    dash.apply_refresh(
        g,
        Ok(Aggregate {
            channels: Vec::new(),
            notes: vec!["versions for a unavailable: timeout".to_string()],
        }),
    );
    assert_eq!(dash.log().len(), 1);
    assert!(dash.error.is_none());
}

#[test]
fn history_flattens_and_sorts_descending() {
    let mut dash = Dashboard::new();
    let g = dash.begin_refresh();
    dash.apply_refresh(
        g,
        Ok(agg(vec![
            channel("a", "A", &[("v1", 100), ("v2", 300), ("v3", 200)]),
            channel("b", "B", &[]),
        ])),
    );

    let entries = dash.history();
    assert_eq!(entries.len(), 3);
    let epochs: Vec<i64> = entries.iter().map(|e| e.created_at_epoch).collect();
    assert_eq!(epochs, vec![300, 200, 100]);
    assert!(entries.iter().all(|e| e.doc_id == "a" && e.doc_name == "A"));
}

#[test]
fn history_filter_scopes_to_one_document() {
    let mut dash = Dashboard::new();
    let g = dash.begin_refresh();
    dash.apply_refresh(
        g,
        Ok(agg(vec![
            channel("a", "A", &[("v1", 100)]),
            channel("b", "B", &[]),
        ])),
    );

    dash.set_filter("b");
    assert!(dash.history().is_empty());

    dash.set_filter("a");
    assert_eq!(dash.history().len(), 1);

    dash.clear_filter();
    assert_eq!(dash.history().len(), 1);
}

#[test]
fn summary_is_recomputed_from_channels() {
    let mut dash = Dashboard::new();
    let g = dash.begin_refresh();
    dash.apply_refresh(
        g,
        Ok(agg(vec![
            channel("a", "A", &[("v1", 1), ("v2", 2)]),
            channel("b", "B", &[("v3", 3)]),
        ])),
    );

    let s = dash.summary(42);
    assert_eq!(s.total_messages, 42);
    assert_eq!(s.active_documents, 2);
    assert_eq!(s.total_versions, 3);

    let g = dash.begin_refresh();
    dash.apply_refresh(g, Ok(agg(Vec::new())));
    let s = dash.summary(0);
    assert_eq!(s.active_documents, 0);
    assert_eq!(s.total_versions, 0);
}

#[test]
fn tabs_cycle_in_order() {
    let mut dash = Dashboard::new();
    assert_eq!(dash.tab, Tab::Dashboard);
    dash.cycle_tab();
    assert_eq!(dash.tab, Tab::History);
    dash.cycle_tab();
    assert_eq!(dash.tab, Tab::Settings);
    dash.cycle_tab();
    assert_eq!(dash.tab, Tab::Dashboard);
}
