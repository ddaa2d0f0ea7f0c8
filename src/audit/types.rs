// Audit event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sandbox::{ExecutionStatus, SandboxRequest, SandboxResult};

/// Classifies sandbox audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditEventKind {
    #[serde(rename = "sandbox.execution.start")]
    ExecutionStart,
    #[serde(rename = "sandbox.execution.complete")]
    ExecutionComplete,
    #[serde(rename = "sandbox.execution.timeout")]
    Timeout,
    #[serde(rename = "sandbox.execution.denied")]
    Denied,
}

/// A single audit entry, one JSON line per event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub timestamp: DateTime<Utc>,
    pub event_type: AuditEventKind,
    pub request_id: String,
    pub tool_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExecutionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEvent {
    pub fn start(request: &SandboxRequest) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type: AuditEventKind::ExecutionStart,
            request_id: request.request_id.clone(),
            tool_name: request.tool_name.clone(),
            agent_id: non_empty(&request.agent_id),
            status: None,
            duration_ms: None,
            error: None,
        }
    }

    pub fn completed(result: &SandboxResult, agent_id: &str) -> Self {
        let event_type = match result.status {
            ExecutionStatus::Timeout => AuditEventKind::Timeout,
            ExecutionStatus::Denied => AuditEventKind::Denied,
            _ => AuditEventKind::ExecutionComplete,
        };
        Self {
            timestamp: Utc::now(),
            event_type,
            request_id: result.request_id.clone(),
            tool_name: result.tool_name.clone(),
            agent_id: non_empty(agent_id),
            status: Some(result.status),
            duration_ms: Some(result.duration_ms),
            error: result.error.clone(),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
