use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent};

use crate::aggregate;
use crate::dashboard::{Dashboard, Tab};
use crate::model::ConsoleConfig;
use crate::reconcile;
use crate::remote::ApiClient;

pub(super) struct PendingRevert {
    pub(super) doc_id: String,
    pub(super) doc_name: String,
    pub(super) positional: u32,
    pub(super) version_id: Option<String>,
}

pub(super) struct App {
    pub(super) client: ApiClient,
    pub(super) cfg: ConsoleConfig,
    rt: tokio::runtime::Runtime,

    pub(super) dash: Dashboard,
    pub(super) message_count: u64,

    pub(super) selected_channel: usize,
    pub(super) selected_entry: usize,

    /// Dismissible mutation outcome or soft-failure notice.
    pub(super) notice: Option<String>,
    pub(super) confirm: Option<PendingRevert>,

    pub(super) quit: bool,
}

impl App {
    pub(super) fn new(client: ApiClient, cfg: ConsoleConfig) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("build tokio runtime")?;
        Ok(Self {
            client,
            cfg,
            rt,
            dash: Dashboard::new(),
            message_count: 0,
            selected_channel: 0,
            selected_entry: 0,
            notice: None,
            confirm: None,
            quit: false,
        })
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        if self.confirm.is_some() {
            self.handle_confirm_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit = true,

            KeyCode::Esc => {
                if self.notice.take().is_none() {
                    self.quit = true;
                }
            }

            KeyCode::Tab => self.dash.cycle_tab(),

            KeyCode::Char('r') => {
                // `refreshing` gates the trigger; it cancels nothing in flight.
                if !self.dash.refreshing {
                    self.refresh();
                }
            }

            KeyCode::Char('s') => {
                if !self.dash.refreshing {
                    self.resync();
                }
            }

            KeyCode::Char('u') => self.trigger_selected(),
            KeyCode::Char('v') => self.request_revert(),

            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),

            KeyCode::Enter => match self.dash.tab {
                Tab::Dashboard => {
                    if let Some(c) = self.dash.channels().get(self.selected_channel) {
                        let id = c.id.clone();
                        self.dash.set_filter(id);
                        self.dash.tab = Tab::History;
                        self.selected_entry = 0;
                    }
                }
                Tab::History => {
                    self.dash.clear_filter();
                    self.selected_entry = 0;
                }
                Tab::Settings => {}
            },

            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(pending) = self.confirm.take() {
                    self.run_revert(pending);
                }
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                self.confirm = None;
                self.notice = Some("revert cancelled".to_string());
            }
            _ => {}
        }
    }

    pub(super) fn refresh(&mut self) {
        let generation = self.dash.begin_refresh();
        let result = self.rt.block_on(aggregate::aggregate(
            &self.client,
            self.cfg.folder_id.as_deref(),
            self.cfg.fanout(),
        ));
        if self.dash.apply_refresh(generation, result) {
            self.clamp_selection();
        }
        // Counter soft-degrades to zero.
        self.message_count = self
            .rt
            .block_on(self.client.message_count(self.cfg.team_id.as_deref()))
            .unwrap_or(0);
    }

    fn resync(&mut self) {
        let result = self.rt.block_on(reconcile::resync_folder(
            &self.client,
            self.cfg.folder_id.as_deref(),
            self.cfg.fanout(),
        ));
        self.apply_mutation(result);
    }

    fn trigger_selected(&mut self) {
        let Some(doc_id) = self.selected_doc_id() else {
            return;
        };
        let result = self.rt.block_on(reconcile::force_update(
            &self.client,
            &doc_id,
            self.cfg.folder_id.as_deref(),
            self.cfg.fanout(),
        ));
        self.apply_mutation(result);
    }

    fn request_revert(&mut self) {
        if self.dash.tab != Tab::History {
            return;
        }
        let entries = self.dash.history();
        let Some(entry) = entries.get(self.selected_entry) else {
            return;
        };
        self.confirm = Some(PendingRevert {
            doc_id: entry.doc_id.clone(),
            doc_name: entry.doc_name.clone(),
            positional: entry.positional_version,
            version_id: if entry.version_id.is_empty() {
                None
            } else {
                Some(entry.version_id.clone())
            },
        });
    }

    fn run_revert(&mut self, pending: PendingRevert) {
        let result = self.rt.block_on(reconcile::revert_version(
            &self.client,
            &pending.doc_id,
            pending.positional,
            pending.version_id.as_deref(),
            self.cfg.folder_id.as_deref(),
            self.cfg.fanout(),
        ));
        self.apply_mutation(result);
    }

    fn apply_mutation(
        &mut self,
        result: Result<(reconcile::MutationOutcome, aggregate::Aggregate)>,
    ) {
        match result {
            Ok((outcome, agg)) => {
                let generation = self.dash.begin_refresh();
                self.dash.apply_refresh(generation, Ok(agg));
                self.clamp_selection();
                self.notice = Some(outcome.message);
            }
            Err(err) => {
                let msg = format!("error: {:#}", err);
                self.dash.push_log(msg.clone());
                self.notice = Some(msg);
            }
        }
    }

    fn selected_doc_id(&self) -> Option<String> {
        match self.dash.tab {
            Tab::Dashboard => self
                .dash
                .channels()
                .get(self.selected_channel)
                .map(|c| c.id.clone()),
            Tab::History => self
                .dash
                .history()
                .get(self.selected_entry)
                .map(|e| e.doc_id.clone()),
            Tab::Settings => None,
        }
    }

    fn move_selection(&mut self, delta: i64) {
        let (cursor, len) = match self.dash.tab {
            Tab::Dashboard => (&mut self.selected_channel, self.dash.channels().len()),
            Tab::History => (&mut self.selected_entry, self.dash.history().len()),
            Tab::Settings => return,
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        let next = (*cursor as i64 + delta).clamp(0, len as i64 - 1);
        *cursor = next as usize;
    }

    fn clamp_selection(&mut self) {
        let channels = self.dash.channels().len();
        if self.selected_channel >= channels {
            self.selected_channel = channels.saturating_sub(1);
        }
        let entries = self.dash.history().len();
        if self.selected_entry >= entries {
            self.selected_entry = entries.saturating_sub(1);
        }
    }
}
