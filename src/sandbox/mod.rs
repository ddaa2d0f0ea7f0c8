// Sandbox execution core
//
// Registry of callable tools, layered limit policies, and a runner that
// bounds each call's runtime and classifies its outcome deterministically.

pub mod enforcer;
pub mod history;
pub mod registry;
pub mod runner;
pub mod types;

pub use enforcer::LimitEnforcer;
pub use history::ExecutionHistory;
pub use registry::{FnHandler, ToolHandler, ToolRegistry};
pub use runner::SandboxRunner;
pub use types::{ExecutionStatus, ResourceLimits, SandboxRequest, SandboxResult};
