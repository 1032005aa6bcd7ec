//! Append-only event memory backed by a JSON file.
//!
//! The agent writes a record for every failed cycle and reads back only
//! the recent-failure window the mood classifier needs. Like the bias
//! store, the read path is tolerant: a missing or corrupt file starts
//! the log empty instead of failing the run.

use std::path::{Path, PathBuf};

use warden_types::{EventKind, EventRecord};

use crate::error::StoreError;

/// The persisted event log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    history: Vec<EventRecord>,
    path: Option<PathBuf>,
}

impl Memory {
    /// A log with no backing file. Records stay in memory.
    pub const fn ephemeral() -> Self {
        Self {
            history: Vec::new(),
            path: None,
        }
    }

    /// Load the log from a JSON file, binding future saves to the same
    /// path. Missing or corrupt files start the log empty.
    pub fn load(path: &Path) -> Self {
        let history = match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(history) => history,
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        %error,
                        "event memory is corrupt, starting empty"
                    );
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self {
            history,
            path: Some(path.to_path_buf()),
        }
    }

    /// Append a record and persist the whole log.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the save fails; the in-memory log is
    /// updated regardless.
    pub fn record(&mut self, record: EventRecord) -> Result<(), StoreError> {
        tracing::info!(kind = ?record.kind, reason = %record.reason, "recording event");
        self.history.push(record);
        self.save()
    }

    /// The reasons of the `n` most recent failure records, oldest first.
    pub fn recent_failure_reasons(&self, n: usize) -> Vec<String> {
        let mut reasons: Vec<String> = self
            .history
            .iter()
            .rev()
            .filter(|record| record.kind == EventKind::Failure)
            .take(n)
            .map(|record| record.reason.clone())
            .collect();
        reasons.reverse();
        reasons
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Drop every record and persist the empty log.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the save fails.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.history.clear();
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.history)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
