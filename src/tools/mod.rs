// Built-in tool handlers

mod echo;
mod sleep;

pub use echo::EchoHandler;
pub use sleep::SleepHandler;

use crate::sandbox::SandboxRunner;
use std::sync::Arc;

/// Register the built-in tools on a runner.
pub fn register_builtin_tools(runner: &SandboxRunner) {
    runner.register_tool("echo", Arc::new(EchoHandler));
    runner.register_tool("sleep_ms", Arc::new(SleepHandler));
}
