// Audit logger
//
// Records sandbox execution events as JSON lines, one event per line,
// suitable for log-pipeline ingestion.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::AuditEvent;
use crate::sandbox::{SandboxRequest, SandboxResult};

pub struct AuditLogger {
    log_path: PathBuf,
    file: Mutex<File>,
}

impl AuditLogger {
    /// Open (or create) the audit log for appending.
    pub fn new(log_path: PathBuf) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create audit log directory: {}", parent.display())
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open audit log: {}", log_path.display()))?;
        Ok(Self {
            log_path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }

    /// Record an execution starting.
    pub fn log_start(&self, request: &SandboxRequest) -> Result<()> {
        self.log(&AuditEvent::start(request))
    }

    /// Record a completed execution (any terminal status).
    pub fn log_result(&self, result: &SandboxResult, agent_id: &str) -> Result<()> {
        self.log(&AuditEvent::completed(result, agent_id))
    }

    fn log(&self, event: &AuditEvent) -> Result<()> {
        let json = serde_json::to_string(event).context("Failed to serialize audit event")?;
        let mut file = self.file.lock().expect("audit log lock poisoned");
        writeln!(file, "{}", json).context("Failed to write audit event")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::ExecutionStatus;

    #[test]
    fn test_events_written_one_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = AuditLogger::new(path.clone()).unwrap();

        let request = SandboxRequest::new("echo");
        logger.log_start(&request).unwrap();

        let mut result = SandboxResult::running("sbx-1".to_string(), "echo".to_string());
        result.status = ExecutionStatus::Success;
        result.duration_ms = 2.0;
        logger.log_result(&result, "agent-1").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: AuditEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.tool_name, "echo");
        let second: AuditEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.status, Some(ExecutionStatus::Success));
        assert_eq!(second.agent_id.as_deref(), Some("agent-1"));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/audit.jsonl");
        let logger = AuditLogger::new(path.clone()).unwrap();
        assert_eq!(logger.path(), &path);
        assert!(path.exists());
    }
}
