//! Dashboard state controller: navigational state, refresh lifecycle flags,
//! and the pure derivations (flattened history, summary counters) over the
//! aggregated channel collection.
//!
//! Runtime-agnostic: callers run the aggregation however they like and feed
//! the result back through the generation-guarded `apply_refresh`, so a
//! stale in-flight pass can never clobber a newer one.

use anyhow::Result;

use crate::aggregate::Aggregate;
use crate::model::{Channel, HistoryEntry, Summary};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    History,
    Settings,
}

impl Tab {
    pub fn next(self) -> Tab {
        match self {
            Tab::Dashboard => Tab::History,
            Tab::History => Tab::Settings,
            Tab::Settings => Tab::Dashboard,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::History => "history",
            Tab::Settings => "settings",
        }
    }
}

pub struct Dashboard {
    pub tab: Tab,
    pub loading: bool,
    pub refreshing: bool,
    pub error: Option<String>,
    pub selected_doc: Option<String>,

    channels: Vec<Channel>,
    log: Vec<String>,

    generation: u64,
    completed_once: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            tab: Tab::Dashboard,
            loading: false,
            refreshing: false,
            error: None,
            selected_doc: None,
            channels: Vec::new(),
            log: Vec::new(),
            generation: 0,
            completed_once: false,
        }
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    /// Start a refresh pass: bumps and returns the generation the caller
    /// must hand back to `apply_refresh`. `loading` is only raised before
    /// the first completed pass; `refreshing` gates re-triggers at the UI
    /// level but cancels nothing already in flight.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.refreshing = true;
        if !self.completed_once {
            self.loading = true;
        }
        self.generation
    }

    /// Apply a finished pass. Returns false (and changes nothing) when a
    /// newer refresh was started after this one; the stale result is
    /// discarded rather than applied.
    pub fn apply_refresh(&mut self, generation: u64, result: Result<Aggregate>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        self.refreshing = false;
        self.completed_once = true;

        match result {
            Ok(agg) => {
                self.error = None;
                self.channels = agg.channels;
                self.log.extend(agg.notes);
            }
            Err(err) => {
                // Previously rendered channels are discarded, not kept stale.
                self.error = Some(format!("{:#}", err));
                self.channels = Vec::new();
            }
        }
        true
    }

    pub fn cycle_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn set_filter(&mut self, doc_id: impl Into<String>) {
        self.selected_doc = Some(doc_id.into());
    }

    pub fn clear_filter(&mut self) {
        self.selected_doc = None;
    }

    /// Flattened version list across all channels, or only the filtered one,
    /// sorted descending by timestamp. Equal timestamps keep flattening
    /// order (stable sort); no stronger tie order is promised.
    pub fn history(&self) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = self
            .channels
            .iter()
            .filter(|c| match &self.selected_doc {
                Some(id) => &c.id == id,
                None => true,
            })
            .flat_map(|c| {
                c.versions.iter().map(|v| HistoryEntry {
                    doc_id: c.id.clone(),
                    doc_name: c.name.clone(),
                    positional_version: v.positional_version,
                    version_id: v.version_id.clone(),
                    timestamp: v.timestamp.clone(),
                    created_at_epoch: v.created_at_epoch,
                    chars_added: v.chars_added,
                })
            })
            .collect();
        entries.sort_by(|a, b| b.created_at_epoch.cmp(&a.created_at_epoch));
        entries
    }

    /// Pure reductions over the current channel collection; recomputed on
    /// every call, never cached.
    pub fn summary(&self, total_messages: u64) -> Summary {
        Summary {
            total_messages,
            active_documents: self.channels.len(),
            total_versions: self.channels.iter().map(|c| c.action_count).sum(),
        }
    }
}

#[cfg(test)]
#[path = "tests/dashboard/state_tests.rs"]
mod tests;
