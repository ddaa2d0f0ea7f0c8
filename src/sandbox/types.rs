// Core types for sandboxed tool execution
//
// Wire-compatible with the agent-tool-sandbox JSON format

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::constants::{
    DEFAULT_MAX_DURATION_MS, DEFAULT_MAX_MEMORY_MB, DEFAULT_MAX_OUTPUT_BYTES,
};

/// Lifecycle status of a sandboxed execution.
///
/// `Pending` and `Running` are transient; only the four terminal statuses
/// are ever appended to history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Success,
    Failed,
    Timeout,
    Denied,
}

impl ExecutionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Success | Self::Failed | Self::Timeout | Self::Denied
        )
    }
}

/// Resource ceilings applied to one execution. Immutable once constructed.
///
/// These are cooperative policy enforcement (deadline + size checks) over
/// trusted in-process handlers, not an OS-level isolation boundary. Callers
/// needing real isolation must add a process/container boundary beneath
/// this core. `max_memory_mb` is advisory only — memory is not metered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLimits {
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: u64,
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: u64,
    #[serde(default = "default_max_memory_mb")]
    pub max_memory_mb: u64,
    #[serde(default)]
    pub allow_network: bool,
    #[serde(default)]
    pub allow_filesystem: bool,
    #[serde(default)]
    pub allowed_paths: Vec<String>,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_duration_ms: DEFAULT_MAX_DURATION_MS,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            max_memory_mb: DEFAULT_MAX_MEMORY_MB,
            allow_network: false,
            allow_filesystem: false,
            allowed_paths: Vec::new(),
        }
    }
}

impl ResourceLimits {
    /// Fold another policy in: numeric ceilings take the minimum, boolean
    /// allowances the logical AND. Merging never raises a ceiling.
    ///
    /// `allowed_paths` is not merged — the left operand's paths are kept.
    /// The enforcer always folds with the request on the left, so the
    /// request's own path set survives the merge.
    pub fn merged_with(&self, other: &ResourceLimits) -> ResourceLimits {
        ResourceLimits {
            max_duration_ms: self.max_duration_ms.min(other.max_duration_ms),
            max_output_bytes: self.max_output_bytes.min(other.max_output_bytes),
            max_memory_mb: self.max_memory_mb.min(other.max_memory_mb),
            allow_network: self.allow_network && other.allow_network,
            allow_filesystem: self.allow_filesystem && other.allow_filesystem,
            allowed_paths: self.allowed_paths.clone(),
        }
    }
}

fn default_max_duration_ms() -> u64 {
    DEFAULT_MAX_DURATION_MS
}

fn default_max_output_bytes() -> u64 {
    DEFAULT_MAX_OUTPUT_BYTES
}

fn default_max_memory_mb() -> u64 {
    DEFAULT_MAX_MEMORY_MB
}

/// Sandbox execution request. Consumed once by the runner; only the
/// resulting [`SandboxResult`] is retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxRequest {
    /// Caller-supplied id, or empty to have the runner generate one
    #[serde(default)]
    pub request_id: String,
    /// Opaque caller identity, may be empty
    #[serde(default)]
    pub agent_id: String,
    /// Key into the tool registry
    pub tool_name: String,
    /// Named arguments passed to the handler
    #[serde(default)]
    pub tool_input: Map<String, Value>,
    /// Limits attached to this request; defaults to the default policy
    #[serde(default)]
    pub limits: ResourceLimits,
}

impl SandboxRequest {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            request_id: String::new(),
            agent_id: String::new(),
            tool_name: tool_name.into(),
            tool_input: Map::new(),
            limits: ResourceLimits::default(),
        }
    }

    pub fn with_input(mut self, tool_input: Map<String, Value>) -> Self {
        self.tool_input = tool_input;
        self
    }

    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Generate a unique request id. Format: sbx-[12 hex chars]
    pub fn generate_id() -> String {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        format!("sbx-{}", &hex[..12])
    }
}

/// Sandbox execution result.
///
/// Exactly one of `output`/`error` is meaningfully populated per terminal
/// status, with one exception: an output-size violation reports `Failed`
/// but keeps the oversized `output` attached for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxResult {
    pub request_id: String,
    pub tool_name: String,
    pub status: ExecutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub duration_ms: f64,
    #[serde(default)]
    pub output_bytes: u64,
    /// Open mapping, reserved for extension
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl SandboxResult {
    /// Create the in-flight result shell the runner fills in.
    pub fn running(request_id: String, tool_name: String) -> Self {
        Self {
            request_id,
            tool_name,
            status: ExecutionStatus::Running,
            output: None,
            error: None,
            duration_ms: 0.0,
            output_bytes: 0,
            metadata: Map::new(),
        }
    }
}
