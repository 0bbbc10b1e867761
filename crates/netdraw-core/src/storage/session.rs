//! Load/save orchestration with dirty tracking and periodic auto-save.

use super::{Storage, StorageError};
use crate::config::EditorConfig;
use crate::document::{self, LoadReport};
use crate::error::{TopologyError, TopologyResult};
use crate::interaction::InteractionOutcome;
use crate::model::TopologyModel;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Severity of an operator notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message for the operator, e.g. a failed save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Persistence session for one topology.
///
/// Saves are fire-and-forget: a failure leaves the local model untouched and
/// the session dirty, records a notice, and is not retried until the next
/// explicit save or auto-save tick.
pub struct TopologySession<S: Storage> {
    storage: Arc<S>,
    topology_id: String,
    config: EditorConfig,
    /// `None` disables auto-save.
    interval: Option<Duration>,
    last_save: Option<Instant>,
    dirty: bool,
    notices: Vec<Notice>,
}

impl<S: Storage> TopologySession<S> {
    pub fn new(storage: Arc<S>, topology_id: impl Into<String>, config: &EditorConfig) -> Self {
        let interval = (config.autosave_interval_secs > 0).then(|| Duration::from_secs(config.autosave_interval_secs));
        Self {
            storage,
            topology_id: topology_id.into(),
            config: config.clone(),
            interval,
            last_save: None,
            dirty: false,
            notices: Vec::new(),
        }
    }

    pub fn topology_id(&self) -> &str {
        &self.topology_id
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Set the auto-save interval; `None` disables auto-save.
    pub fn set_interval(&mut self, interval: Option<Duration>) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the session dirty if an interaction changed the topology.
    pub fn record(&mut self, outcome: &InteractionOutcome) {
        if outcome.modifies_topology() {
            self.dirty = true;
        }
    }

    /// Pending operator notices, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Load the topology.
    ///
    /// Never fails: if the backend cannot deliver a document, an empty model is
    /// returned and an error notice is recorded.
    pub async fn load(&mut self) -> (TopologyModel, LoadReport) {
        match self.try_load().await {
            Ok((model, report)) => {
                if !report.is_clean() {
                    self.notices.push(Notice::new(
                        NoticeLevel::Warning,
                        format!("{} invalid record(s) were skipped while loading", report.total()),
                    ));
                }
                (model, report)
            }
            Err(err) => {
                log::error!("{}", err);
                self.notices.push(Notice::new(NoticeLevel::Error, err.to_string()));
                (TopologyModel::new(&self.config), LoadReport::default())
            }
        }
    }

    /// Load the topology, surfacing backend failures as `LoadFailed`.
    pub async fn try_load(&mut self) -> TopologyResult<(TopologyModel, LoadReport)> {
        let doc = self
            .storage
            .load(&self.topology_id)
            .await
            .map_err(|e| load_failed(&self.topology_id, e))?;

        let (model, report) = document::deserialize(&doc, &self.config);
        log::info!(
            "Loaded topology {} ({} devices, {} connections)",
            self.topology_id,
            model.devices().len(),
            model.connections().len()
        );
        self.dirty = false;
        self.last_save = Some(Instant::now());
        Ok((model, report))
    }

    /// Save the topology now.
    pub async fn save(&mut self, model: &TopologyModel) -> TopologyResult<()> {
        // Snapshot first so the pending save holds no borrow of the model
        let doc = document::serialize(model);

        match self.storage.save(&self.topology_id, &doc).await {
            Ok(()) => {
                log::info!("Saved topology {}", self.topology_id);
                self.dirty = false;
                self.last_save = Some(Instant::now());
                Ok(())
            }
            Err(e) => {
                let err = TopologyError::SaveFailed(format!("{}: {}", self.topology_id, e));
                log::error!("{}", err);
                self.notices.push(Notice::new(NoticeLevel::Error, err.to_string()));
                Err(err)
            }
        }
    }

    /// Whether the session is dirty and the auto-save interval has elapsed.
    pub fn should_save(&self) -> bool {
        let Some(interval) = self.interval else {
            return false;
        };
        if !self.dirty {
            return false;
        }
        match self.last_save {
            Some(last) => last.elapsed() >= interval,
            None => true,
        }
    }

    /// Auto-save tick. Returns true if a save was performed.
    pub async fn maybe_save(&mut self, model: &TopologyModel) -> TopologyResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }
        self.save(model).await?;
        Ok(true)
    }
}

fn load_failed(id: &str, err: StorageError) -> TopologyError {
    TopologyError::LoadFailed(format!("{}: {}", id, err))
}
