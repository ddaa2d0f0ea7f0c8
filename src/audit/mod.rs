// Audit trail for sandbox executions

mod logger;
mod types;

pub use logger::AuditLogger;
pub use types::{AuditEvent, AuditEventKind};
