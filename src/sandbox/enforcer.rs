// Limit enforcement
//
// Computes the effective (most restrictive) policy for a request and
// performs the pre-flight admission check before dispatch.

use std::collections::HashMap;

use crate::sandbox::types::{ResourceLimits, SandboxRequest};

/// Enforces resource limits across sandbox requests.
///
/// Holds the global policy plus optional per-tool overrides. Overrides are
/// set at construction/startup time; execution paths only read.
#[derive(Debug, Clone)]
pub struct LimitEnforcer {
    global_limits: ResourceLimits,
    tool_limits: HashMap<String, ResourceLimits>,
}

impl LimitEnforcer {
    pub fn new(global_limits: ResourceLimits) -> Self {
        Self {
            global_limits,
            tool_limits: HashMap::new(),
        }
    }

    pub fn global_limits(&self) -> &ResourceLimits {
        &self.global_limits
    }

    /// Set the override for a specific tool. Last write wins.
    pub fn set_tool_limits(&mut self, tool_name: impl Into<String>, limits: ResourceLimits) {
        self.tool_limits.insert(tool_name.into(), limits);
    }

    pub fn tool_limits(&self, tool_name: &str) -> Option<&ResourceLimits> {
        self.tool_limits.get(tool_name)
    }

    /// Effective limits for a request.
    ///
    /// With a per-tool override present, returns the fieldwise-minimum/AND
    /// merge of request, override, and global policies (request folds first
    /// so its `allowed_paths` survive). With no override, the request's own
    /// limits are returned unchanged — the global policy is deliberately not
    /// folded in on that path; `check_allowed` gates the duration ceiling
    /// against the global policy separately.
    pub fn get_effective_limits(&self, request: &SandboxRequest) -> ResourceLimits {
        match self.tool_limits.get(&request.tool_name) {
            Some(tool_limits) => request
                .limits
                .merged_with(tool_limits)
                .merged_with(&self.global_limits),
            None => request.limits.clone(),
        }
    }

    /// Admission check, evaluated before dispatch.
    ///
    /// Rejects only when the request's duration ceiling exceeds the global
    /// one. Output/memory ceilings and the network/filesystem flags are not
    /// re-validated here; duration and output size are enforced during and
    /// after execution by the runner.
    pub fn check_allowed(&self, request: &SandboxRequest) -> (bool, String) {
        if request.limits.max_duration_ms > self.global_limits.max_duration_ms {
            return (
                false,
                format!(
                    "Duration {}ms exceeds global limit {}ms",
                    request.limits.max_duration_ms, self.global_limits.max_duration_ms
                ),
            );
        }
        (true, "ok".to_string())
    }
}

impl Default for LimitEnforcer {
    fn default() -> Self {
        Self::new(ResourceLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enforcer_defaults() {
        let enforcer = LimitEnforcer::default();
        assert_eq!(enforcer.global_limits().max_duration_ms, 30_000);
    }

    #[test]
    fn test_set_tool_limits_last_write_wins() {
        let mut enforcer = LimitEnforcer::default();
        enforcer.set_tool_limits(
            "web_fetch",
            ResourceLimits {
                max_duration_ms: 9000,
                ..Default::default()
            },
        );
        enforcer.set_tool_limits(
            "web_fetch",
            ResourceLimits {
                max_duration_ms: 5000,
                ..Default::default()
            },
        );
        assert_eq!(
            enforcer.tool_limits("web_fetch").unwrap().max_duration_ms,
            5000
        );
    }

    #[test]
    fn test_effective_limits_without_override_unchanged() {
        let enforcer = LimitEnforcer::new(ResourceLimits {
            max_duration_ms: 1000,
            ..Default::default()
        });
        let request = SandboxRequest::new("anything").with_limits(ResourceLimits {
            max_duration_ms: 20_000,
            allow_network: true,
            ..Default::default()
        });

        // No override registered: the request's limits come back as-is,
        // even though they are looser than the global policy.
        let effective = enforcer.get_effective_limits(&request);
        assert_eq!(effective, request.limits);
    }

    #[test]
    fn test_effective_limits_with_override_merges_all_three() {
        let mut enforcer = LimitEnforcer::new(ResourceLimits {
            max_duration_ms: 10_000,
            max_output_bytes: 500_000,
            ..Default::default()
        });
        enforcer.set_tool_limits(
            "search",
            ResourceLimits {
                max_duration_ms: 5000,
                allow_network: true,
                ..Default::default()
            },
        );
        let request = SandboxRequest::new("search").with_limits(ResourceLimits {
            max_duration_ms: 8000,
            allow_network: true,
            ..Default::default()
        });

        let effective = enforcer.get_effective_limits(&request);
        assert_eq!(effective.max_duration_ms, 5000); // min of 8000/5000/10000
        assert_eq!(effective.max_output_bytes, 500_000); // global is tightest
        assert!(!effective.allow_network); // global denies network
    }

    #[test]
    fn test_effective_limits_keeps_request_paths() {
        let mut enforcer = LimitEnforcer::default();
        enforcer.set_tool_limits(
            "read_file",
            ResourceLimits {
                allowed_paths: vec!["/etc".to_string()],
                ..Default::default()
            },
        );
        let request = SandboxRequest::new("read_file").with_limits(ResourceLimits {
            allowed_paths: vec!["/tmp/work".to_string()],
            ..Default::default()
        });

        let effective = enforcer.get_effective_limits(&request);
        assert_eq!(effective.allowed_paths, vec!["/tmp/work".to_string()]);
    }

    #[test]
    fn test_check_allowed_ok() {
        let enforcer = LimitEnforcer::default();
        let request = SandboxRequest::new("echo");
        let (allowed, reason) = enforcer.check_allowed(&request);
        assert!(allowed);
        assert_eq!(reason, "ok");
    }

    #[test]
    fn test_check_allowed_at_global_ceiling() {
        let enforcer = LimitEnforcer::new(ResourceLimits {
            max_duration_ms: 5000,
            ..Default::default()
        });
        let request = SandboxRequest::new("echo").with_limits(ResourceLimits {
            max_duration_ms: 5000,
            ..Default::default()
        });
        let (allowed, reason) = enforcer.check_allowed(&request);
        assert!(allowed);
        assert_eq!(reason, "ok");
    }

    #[test]
    fn test_check_allowed_duration_exceeded() {
        let enforcer = LimitEnforcer::new(ResourceLimits {
            max_duration_ms: 5000,
            ..Default::default()
        });
        let request = SandboxRequest::new("echo").with_limits(ResourceLimits {
            max_duration_ms: 10_000,
            ..Default::default()
        });
        let (allowed, reason) = enforcer.check_allowed(&request);
        assert!(!allowed);
        assert!(reason.contains("exceeds global limit"));
        assert_eq!(reason, "Duration 10000ms exceeds global limit 5000ms");
    }
}
