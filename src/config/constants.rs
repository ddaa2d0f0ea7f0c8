// Project-wide constants
//
// Centralised here so port numbers and default limit values have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Default bind address for the sandbox HTTP daemon (localhost only).
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8500";

/// Default HTTP port (split from ADDR for contexts that need just the port).
pub const DEFAULT_HTTP_PORT: u16 = 8500;

/// Base URL the CLI client uses when `--url` is not given.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8500";

/// Service identifier reported by the health endpoint.
pub const SERVICE_NAME: &str = "agent-tool-sandbox";

/// Default wall-clock ceiling for a single execution.
pub const DEFAULT_MAX_DURATION_MS: u64 = 30_000;

/// Default ceiling on the serialized size of a tool's output.
pub const DEFAULT_MAX_OUTPUT_BYTES: u64 = 1_000_000;

/// Default memory ceiling. Advisory only — the core does not meter memory.
pub const DEFAULT_MAX_MEMORY_MB: u64 = 512;

/// Default window size for history queries.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Maximum accepted HTTP request body, guarding against oversized payloads.
pub const DEFAULT_MAX_BODY_BYTES: usize = 4 * 1024 * 1024; // 4MB
