// Sandbox execution runner
//
// Dispatches registered tools under a deadline, classifies the outcome,
// and records terminal results in history.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use serde_json::{Map, Value};
use tokio::time::{timeout, Duration};
use tracing::{debug, info, instrument, warn};

use crate::sandbox::history::ExecutionHistory;
use crate::sandbox::registry::{ToolHandler, ToolRegistry};
use crate::sandbox::types::{ExecutionStatus, SandboxRequest, SandboxResult};

/// Sandboxed tool execution runner.
///
/// Owns the tool registry and the execution history; both are reached only
/// through this type's operations. Independent `execute` calls may run
/// concurrently; history appends are serialized internally.
pub struct SandboxRunner {
    registry: ToolRegistry,
    history: ExecutionHistory,
}

impl SandboxRunner {
    pub fn new() -> Self {
        Self {
            registry: ToolRegistry::new(),
            history: ExecutionHistory::new(),
        }
    }

    /// Register a tool for execution. Last registration for a name wins.
    ///
    /// Registration is expected to happen before concurrent executions
    /// reference the name; the core does not order register/execute races.
    pub fn register_tool(&self, name: impl Into<String>, handler: Arc<dyn ToolHandler>) {
        let name = name.into();
        debug!("Registering tool: {}", name);
        self.registry.register(name, handler);
    }

    /// Register a plain function as a tool.
    pub fn register_fn<F>(&self, name: impl Into<String>, func: F)
    where
        F: Fn(Map<String, Value>) -> Result<Value> + Send + Sync + 'static,
    {
        use crate::sandbox::registry::FnHandler;
        self.register_tool(name, Arc::new(FnHandler(func)));
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn tool_count(&self) -> usize {
        self.registry.len()
    }

    /// Execute a tool under the request's limits.
    ///
    /// Never returns an error: every outcome — normal return, handler error,
    /// handler panic, deadline hit, unknown tool, oversized output — is
    /// classified into a terminal status on the result.
    ///
    /// The deadline releases this call promptly but cannot force-stop the
    /// handler: a timed-out handler keeps running on its detached task until
    /// it completes on its own. Cooperative enforcement only; there is no
    /// process-level isolation beneath this runner.
    #[instrument(skip(self, request), fields(tool = %request.tool_name, agent = %request.agent_id))]
    pub async fn execute(&self, mut request: SandboxRequest) -> SandboxResult {
        if request.request_id.is_empty() {
            request.request_id = SandboxRequest::generate_id();
        }
        let mut result =
            SandboxResult::running(request.request_id.clone(), request.tool_name.clone());

        let Some(handler) = self.registry.get(&request.tool_name) else {
            warn!("Unknown tool: {}", request.tool_name);
            result.status = ExecutionStatus::Denied;
            result.error = Some(format!("Unknown tool: {}", request.tool_name));
            // No timing for this path; duration_ms stays 0.
            self.history.append(result.clone());
            return result;
        };

        let deadline = Duration::from_millis(request.limits.max_duration_ms);
        let args = request.tool_input.clone();
        let start = Instant::now();

        // Spawned so a panicking handler surfaces as a join error instead of
        // unwinding out of `execute`, and so a timed-out handler detaches
        // rather than being polled to cancellation.
        let invocation = tokio::spawn(async move { handler.call(args).await });

        match timeout(deadline, invocation).await {
            Ok(Ok(Ok(output))) => {
                result.output_bytes = serialized_len(&output);
                result.output = Some(output);
                if result.output_bytes > request.limits.max_output_bytes {
                    // Oversized output fails the call but stays attached so
                    // callers can inspect the payload.
                    result.status = ExecutionStatus::Failed;
                    result.error = Some(format!(
                        "Output exceeds limit: {} > {}",
                        result.output_bytes, request.limits.max_output_bytes
                    ));
                } else {
                    result.status = ExecutionStatus::Success;
                }
            }
            Ok(Ok(Err(e))) => {
                result.status = ExecutionStatus::Failed;
                result.error = Some(e.to_string());
            }
            Ok(Err(join_err)) => {
                result.status = ExecutionStatus::Failed;
                result.error = Some(format!("Handler panicked: {}", join_err));
            }
            Err(_) => {
                result.status = ExecutionStatus::Timeout;
                result.error = Some(format!(
                    "Timeout after {}ms",
                    request.limits.max_duration_ms
                ));
            }
        }

        result.duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        match result.status {
            ExecutionStatus::Success => info!(
                duration_ms = result.duration_ms,
                output_bytes = result.output_bytes,
                "Tool executed successfully"
            ),
            _ => warn!(
                status = ?result.status,
                duration_ms = result.duration_ms,
                error = result.error.as_deref().unwrap_or(""),
                "Tool execution did not succeed"
            ),
        }

        self.history.append(result.clone());
        result
    }

    /// Most recent `limit` entries, oldest of the returned window first.
    pub fn get_history(&self, limit: usize) -> Vec<SandboxResult> {
        self.history.recent(limit)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Default for SandboxRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Size of the value's canonical textual serialization (compact JSON).
fn serialized_len(value: &Value) -> u64 {
    serde_json::to_string(value)
        .map(|s| s.len() as u64)
        .unwrap_or(0)
}
