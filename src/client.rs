use crate::config::Config;
use crate::error::{ToolError, ToolResult};
use anyhow::Context;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

/// Shared HTTP context handed to every tool call.
#[derive(Clone)]
pub struct SaidClient {
    pub http: reqwest::Client,
    pub rpc_url: String,
    pub said_api_url: String,
}

impl SaidClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            rpc_url: config.rpc_url.clone(),
            said_api_url: config.said_api_url.clone(),
        })
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.said_api_url, path.trim_start_matches('/'))
    }

    /// Sends a JSON-RPC 2.0 request and returns the whole response envelope.
    pub async fn rpc_call(&self, method: &str, params: Value) -> ToolResult<Value> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        });
        debug!("RPC {} -> {}", method, self.rpc_url);

        let resp = self.http.post(&self.rpc_url).json(&payload).send().await?;
        let body = checked_text(resp).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GETs a registry path and returns the raw body of a successful response.
    pub async fn get_text(&self, path: &str) -> ToolResult<String> {
        let url = self.api_url(path);
        debug!("GET {}", url);

        let resp = self.http.get(&url).send().await?;
        checked_text(resp).await
    }

    pub async fn get_json(&self, path: &str) -> ToolResult<Value> {
        let body = self.get_text(path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> ToolResult<Value> {
        let url = self.api_url(path);
        debug!("POST {}", url);

        let resp = self.http.post(&url).json(body).send().await?;
        let text = checked_text(resp).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

async fn checked_text(resp: reqwest::Response) -> ToolResult<String> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ToolError::Status(status));
    }
    Ok(resp.text().await?)
}
