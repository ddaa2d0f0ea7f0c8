// Sleep tool - waits for `duration_ms` then returns
//
// Useful for exercising the runner's deadline handling end to end.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tokio::time::Duration;

use crate::sandbox::ToolHandler;

pub struct SleepHandler;

#[async_trait]
impl ToolHandler for SleepHandler {
    async fn call(&self, args: Map<String, Value>) -> Result<Value> {
        let duration_ms = args
            .get("duration_ms")
            .and_then(Value::as_u64)
            .context("Missing duration_ms parameter")?;
        tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        Ok(json!({ "slept_ms": duration_ms }))
    }
}
