use std::collections::VecDeque;

use parking_lot::Mutex;
use tracing::debug;

use vigil_core_types::{AlertAction, DetectionId};

use crate::model::{Detection, DetectionFilter};

/// Most-recent entries retained by the log; older ones are evicted.
pub const DEFAULT_LOG_CAPACITY: usize = 100;

/// Append-only, capacity-bounded log of classified detections, newest first.
///
/// Entries are never removed individually; eviction happens only when an
/// append pushes the log past capacity. The lock spans prepend and truncate
/// so readers never observe a partially truncated sequence.
#[derive(Debug)]
pub struct DetectionLog {
    capacity: usize,
    entries: Mutex<VecDeque<Detection>>,
}

impl DetectionLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Prepends a detection, evicting the oldest entries beyond capacity.
    pub fn append(&self, detection: Detection) {
        let mut guard = self.entries.lock();
        guard.push_front(detection);
        guard.truncate(self.capacity);
    }

    /// Replaces the disposition and comment of the entry with `id` in place.
    /// Returns whether the entry was found; mutation after eviction is
    /// silently ignored.
    pub fn mark_action(
        &self,
        id: &DetectionId,
        action: AlertAction,
        comment: Option<String>,
    ) -> bool {
        let mut guard = self.entries.lock();
        match guard.iter_mut().find(|entry| &entry.id == id) {
            Some(entry) => {
                entry.action = action;
                entry.comment = comment;
                true
            }
            None => {
                debug!(%id, "mark for unknown detection ignored");
                false
            }
        }
    }

    /// Cloned snapshot, newest first.
    pub fn list(&self) -> Vec<Detection> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn query(&self, filter: &DetectionFilter) -> Vec<Detection> {
        self.query_where(|entry| filter.matches(entry))
    }

    pub fn query_where(&self, predicate: impl Fn(&Detection) -> bool) -> Vec<Detection> {
        self.entries
            .lock()
            .iter()
            .filter(|entry| predicate(entry))
            .cloned()
            .collect()
    }
}

impl Default for DetectionLog {
    fn default() -> Self {
        Self::new()
    }
}
