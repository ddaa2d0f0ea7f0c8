// Echo tool - returns the call's arguments
//
// Also serves as the default handler body the HTTP register endpoint
// attaches to tools registered by name only.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::sandbox::ToolHandler;

pub struct EchoHandler;

#[async_trait]
impl ToolHandler for EchoHandler {
    async fn call(&self, args: Map<String, Value>) -> Result<Value> {
        Ok(json!({ "echo": args }))
    }
}
