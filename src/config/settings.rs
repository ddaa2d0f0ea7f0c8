// Configuration structs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::constants::{DEFAULT_HTTP_ADDR, DEFAULT_MAX_BODY_BYTES};
use crate::sandbox::ResourceLimits;

/// Top-level configuration for the sandbox daemon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration (daemon mode)
    #[serde(default)]
    pub server: ServerConfig,

    /// Global resource limits enforced across all requests
    #[serde(default)]
    pub global_limits: ResourceLimits,

    /// Per-tool limit overrides, keyed by tool name.
    /// Applied to the enforcer at startup.
    #[serde(default)]
    pub tool_limits: HashMap<String, ResourceLimits>,

    /// Audit log file (JSONL). Absent disables audit logging.
    #[serde(default)]
    pub audit_log: Option<PathBuf>,
}

/// Server configuration for daemon mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8500")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Maximum accepted request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_HTTP_ADDR.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

fn default_bind_address() -> String {
    DEFAULT_HTTP_ADDR.to_string()
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1:8500");
        assert_eq!(config.max_body_bytes, 4 * 1024 * 1024);
    }

    #[test]
    fn test_config_parses_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.global_limits.max_duration_ms, 30_000);
        assert!(config.tool_limits.is_empty());
        assert!(config.audit_log.is_none());
    }

    #[test]
    fn test_config_parses_tool_limits() {
        let config: Config = toml::from_str(
            r#"
            [server]
            bind_address = "0.0.0.0:9000"

            [tool_limits.web_fetch]
            max_duration_ms = 5000
            allow_network = true
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        let limits = config.tool_limits.get("web_fetch").unwrap();
        assert_eq!(limits.max_duration_ms, 5000);
        assert!(limits.allow_network);
        // Unspecified fields fall back to defaults
        assert_eq!(limits.max_output_bytes, 1_000_000);
    }
}
