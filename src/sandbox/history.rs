// Execution history
//
// Append-only log of terminal results. The log grows unbounded for the
// process lifetime — there is no eviction in this core; callers needing
// bounded memory must impose their own cap.

use std::sync::Mutex;

use crate::sandbox::types::SandboxResult;

pub struct ExecutionHistory {
    entries: Mutex<Vec<SandboxResult>>,
}

impl ExecutionHistory {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Append a terminal result. Appends from concurrent executions are
    /// serialized by the lock — no lost updates, no duplicates.
    pub fn append(&self, result: SandboxResult) {
        debug_assert!(
            result.status.is_terminal(),
            "only terminal results belong in history"
        );
        self.entries
            .lock()
            .expect("history lock poisoned")
            .push(result);
    }

    /// Most recent `limit` entries in insertion order, oldest of the
    /// returned window first.
    pub fn recent(&self, limit: usize) -> Vec<SandboxResult> {
        let entries = self.entries.lock().expect("history lock poisoned");
        let start = entries.len().saturating_sub(limit);
        entries[start..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("history lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ExecutionHistory {
    fn default() -> Self {
        Self::new()
    }
}
