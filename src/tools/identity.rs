use super::Tool;
use crate::client::SaidClient;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::debug;

const NOT_FOUND_MESSAGE: &str =
    "SAID identity not found. Register first with register_said_agent.";

/// Reads the agent's own identity document from local disk.
pub struct GetMyIdentityTool {
    workspace: PathBuf,
    home: Option<PathBuf>,
}

impl GetMyIdentityTool {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self::with_home(workspace, dirs::home_dir())
    }

    pub fn with_home(workspace: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            home,
        }
    }

    /// Lookup order: workspace, `~/.nanobot`, `~/.config/said`.
    pub fn candidate_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.workspace.join("said.json")];
        if let Some(home) = &self.home {
            paths.push(home.join(".nanobot").join("said.json"));
            paths.push(home.join(".config").join("said").join("identity.json"));
        }
        paths
    }

    pub async fn read_identity(&self) -> Option<String> {
        for path in self.candidate_paths() {
            if !path.exists() {
                continue;
            }
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => return Some(content),
                Err(e) => debug!("Skipping unreadable identity file {}: {}", path.display(), e),
            }
        }
        None
    }
}

#[async_trait::async_trait]
impl Tool for GetMyIdentityTool {
    fn name(&self) -> &'static str {
        "get_my_said_identity"
    }

    fn description(&self) -> &'static str {
        "Get your own SAID identity information from local said.json file."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _client: &SaidClient, _args: Value) -> String {
        match self.read_identity().await {
            Some(content) => content,
            None => json!({ "error": NOT_FOUND_MESSAGE }).to_string(),
        }
    }
}
