// Tool registry
//
// Name -> handler mapping; the single source of truth for known tools.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// An invocable tool handler.
///
/// One contract for both synchronous and suspending tools: invoke with a
/// mapping of named arguments, await completion. Handlers that run to
/// completion immediately and handlers that await internally look the same
/// to the runner.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: Map<String, Value>) -> Result<Value>;
}

/// Adapter turning a plain function into a [`ToolHandler`].
pub struct FnHandler<F>(pub F);

#[async_trait]
impl<F> ToolHandler for FnHandler<F>
where
    F: Fn(Map<String, Value>) -> Result<Value> + Send + Sync,
{
    async fn call(&self, args: Map<String, Value>) -> Result<Value> {
        (self.0)(args)
    }
}

/// Registry of callable tools.
///
/// Interior locking so registration can happen through a shared reference
/// (the HTTP register endpoint inserts into a shared registry). Lookups
/// during execution only take the read lock.
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn ToolHandler>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or overwrite the handler for `name`. Last registration wins;
    /// overwriting is not an error.
    pub fn register(&self, name: impl Into<String>, handler: Arc<dyn ToolHandler>) {
        self.tools
            .write()
            .expect("tool registry lock poisoned")
            .insert(name.into(), handler);
    }

    /// Register a plain function as a tool.
    pub fn register_fn<F>(&self, name: impl Into<String>, func: F)
    where
        F: Fn(Map<String, Value>) -> Result<Value> + Send + Sync + 'static,
    {
        self.register(name, Arc::new(FnHandler(func)));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools
            .read()
            .expect("tool registry lock poisoned")
            .get(name)
            .cloned()
    }

    /// Registered tool names, sorted for stable listings.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tools
            .read()
            .expect("tool registry lock poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.read().expect("tool registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
