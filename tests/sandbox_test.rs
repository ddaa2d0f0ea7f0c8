// Integration tests for the sandbox execution core

use std::sync::Arc;

use serde_json::{json, Map, Value};
use toolbox::sandbox::{
    ExecutionStatus, LimitEnforcer, ResourceLimits, SandboxRequest, SandboxRunner,
};

fn input(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[tokio::test]
async fn test_full_lifecycle_success_and_history() {
    let runner = SandboxRunner::new();
    runner.register_fn("add", |args| {
        let a = args["a"].as_i64().unwrap_or(0);
        let b = args["b"].as_i64().unwrap_or(0);
        Ok(json!(a + b))
    });

    let request = SandboxRequest::new("add").with_input(input(&[("a", json!(5)), ("b", json!(3))]));
    let result = runner.execute(request).await;

    assert_eq!(result.status, ExecutionStatus::Success);
    assert_eq!(result.output, Some(json!(8)));
    assert!(result.error.is_none());
    assert!(result.request_id.starts_with("sbx-"));

    let history = runner.get_history(100);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].request_id, result.request_id);
}

#[tokio::test]
async fn test_async_tool_result() {
    let runner = SandboxRunner::new();

    struct Doubler;

    #[async_trait::async_trait]
    impl toolbox::sandbox::ToolHandler for Doubler {
        async fn call(&self, args: Map<String, Value>) -> anyhow::Result<Value> {
            tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
            let x = args["x"].as_i64().unwrap_or(0);
            Ok(json!(x * 2))
        }
    }

    runner.register_tool("double", Arc::new(Doubler));
    let request = SandboxRequest::new("double").with_input(input(&[("x", json!(5))]));
    let result = runner.execute(request).await;

    assert_eq!(result.status, ExecutionStatus::Success);
    assert_eq!(result.output, Some(json!(10)));
}

#[tokio::test(start_paused = true)]
async fn test_slow_tool_times_out_promptly() {
    let runner = SandboxRunner::new();

    struct Slow;

    #[async_trait::async_trait]
    impl toolbox::sandbox::ToolHandler for Slow {
        async fn call(&self, _args: Map<String, Value>) -> anyhow::Result<Value> {
            tokio::time::sleep(tokio::time::Duration::from_secs(10)).await;
            Ok(json!("done"))
        }
    }

    runner.register_tool("slow", Arc::new(Slow));
    let request = SandboxRequest::new("slow").with_limits(ResourceLimits {
        max_duration_ms: 100,
        ..Default::default()
    });
    let result = runner.execute(request).await;

    assert_eq!(result.status, ExecutionStatus::Timeout);
    assert!(result.error.as_deref().unwrap().contains("100ms"));
}

#[tokio::test]
async fn test_failing_tool_reports_error_text() {
    let runner = SandboxRunner::new();
    runner.register_fn("bad", |_| anyhow::bail!("test error"));

    let result = runner.execute(SandboxRequest::new("bad")).await;
    assert_eq!(result.status, ExecutionStatus::Failed);
    assert!(result.error.as_deref().unwrap().contains("test error"));
}

#[tokio::test]
async fn test_five_sequential_calls_recorded_in_order() {
    let runner = SandboxRunner::new();
    runner.register_fn("noop", |_| Ok(json!("ok")));

    let mut ids = Vec::new();
    for _ in 0..5 {
        let result = runner.execute(SandboxRequest::new("noop")).await;
        ids.push(result.request_id);
    }

    let history = runner.get_history(100);
    assert_eq!(history.len(), 5);
    assert!(history.iter().all(|r| r.status == ExecutionStatus::Success));
    let history_ids: Vec<_> = history.iter().map(|r| r.request_id.clone()).collect();
    assert_eq!(history_ids, ids);
}

#[tokio::test]
async fn test_admission_then_execution() {
    // The admission check and the runner compose the way the HTTP layer
    // wires them: reject before dispatch, execute when admitted.
    let enforcer = LimitEnforcer::new(ResourceLimits {
        max_duration_ms: 1000,
        ..Default::default()
    });
    let runner = SandboxRunner::new();
    runner.register_fn("noop", |_| Ok(Value::Null));

    let over = SandboxRequest::new("noop").with_limits(ResourceLimits {
        max_duration_ms: 2000,
        ..Default::default()
    });
    let (allowed, reason) = enforcer.check_allowed(&over);
    assert!(!allowed);
    assert!(reason.contains("exceeds global limit"));

    let within = SandboxRequest::new("noop").with_limits(ResourceLimits {
        max_duration_ms: 500,
        ..Default::default()
    });
    let (allowed, reason) = enforcer.check_allowed(&within);
    assert!(allowed);
    assert_eq!(reason, "ok");

    let result = runner.execute(within).await;
    assert_eq!(result.status, ExecutionStatus::Success);
}
