// HTTP client for the sandbox daemon
//
// Used by the CLI subcommands; talks to the /v1 API of a running server.

use anyhow::{bail, Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

use crate::sandbox::{SandboxRequest, SandboxResult};

pub struct SandboxClient {
    base_url: String,
    http: reqwest::Client,
}

impl SandboxClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<Value> {
        let resp = self
            .http
            .get(self.url("health"))
            .send()
            .await
            .context("Health request failed")?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    pub async fn list_tools(&self) -> Result<Vec<String>> {
        let resp = self
            .http
            .get(self.url("tools"))
            .send()
            .await
            .context("Tools request failed")?
            .error_for_status()?;
        let body: Value = resp.json().await?;
        let tools = body["tools"]
            .as_array()
            .context("Malformed tools response")?
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect();
        Ok(tools)
    }

    pub async fn register_tool(&self, name: &str, description: &str) -> Result<Value> {
        let resp = self
            .http
            .post(self.url("tools/register"))
            .json(&serde_json::json!({ "name": name, "description": description }))
            .send()
            .await
            .context("Register request failed")?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    /// Execute a tool. Admission rejections (HTTP 400) surface as errors
    /// carrying the server's reason.
    pub async fn execute(&self, request: &SandboxRequest) -> Result<SandboxResult> {
        let resp = self
            .http
            .post(self.url("execute"))
            .json(request)
            .send()
            .await
            .context("Execute request failed")?;

        if resp.status() == StatusCode::BAD_REQUEST {
            let body: Value = resp.json().await.unwrap_or_default();
            let detail = body["detail"].as_str().unwrap_or("request rejected");
            bail!("Request rejected: {}", detail);
        }

        let resp = resp.error_for_status()?;
        Ok(resp.json().await?)
    }

    pub async fn history(&self, limit: usize) -> Result<Vec<SandboxResult>> {
        let resp = self
            .http
            .get(self.url("history"))
            .query(&[("limit", limit)])
            .send()
            .await
            .context("History request failed")?
            .error_for_status()?;
        let body: Value = resp.json().await?;
        let entries = serde_json::from_value(body["history"].clone())
            .context("Malformed history response")?;
        Ok(entries)
    }
}
