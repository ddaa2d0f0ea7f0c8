// Sandbox HTTP server
// Exposes the execution core to network callers

mod handlers;

pub use handlers::{create_router, ApiError};

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::audit::AuditLogger;
use crate::config::{Config, ServerConfig};
use crate::sandbox::{LimitEnforcer, SandboxRunner};
use crate::tools::register_builtin_tools;

/// Shared state injected into the HTTP handlers.
///
/// Runner, enforcer, and audit logger are explicit instances owned here —
/// not process-wide singletons — so tests can build isolated servers.
pub struct AppState {
    pub runner: SandboxRunner,
    pub enforcer: LimitEnforcer,
    pub audit: Option<AuditLogger>,
}

/// Main sandbox server structure
pub struct SandboxServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl SandboxServer {
    /// Build a server from configuration: global limits and per-tool
    /// overrides feed the enforcer, built-in tools are pre-registered,
    /// and the audit log is opened when configured.
    pub fn new(config: Config) -> Result<Self> {
        let runner = SandboxRunner::new();
        register_builtin_tools(&runner);

        let mut enforcer = LimitEnforcer::new(config.global_limits.clone());
        for (tool_name, limits) in &config.tool_limits {
            enforcer.set_tool_limits(tool_name.clone(), limits.clone());
        }

        let audit = match &config.audit_log {
            Some(path) => Some(AuditLogger::new(path.clone())?),
            None => None,
        };

        Ok(Self {
            state: Arc::new(AppState {
                runner,
                enforcer,
                audit,
            }),
            config: config.server,
        })
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Start the HTTP server
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self.config.bind_address.parse()?;

        // Body size limit guards against oversized foreign payloads.
        let app = create_router(Arc::clone(&self.state))
            .layer(axum::extract::DefaultBodyLimit::max(self.config.max_body_bytes))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http());

        tracing::info!(
            "Starting agent tool sandbox on {} ({} tools registered)",
            addr,
            self.state.runner.tool_count()
        );

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
