use super::{parse_args, Tool};
use crate::client::SaidClient;
use crate::error::{ToolError, ToolResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

#[derive(Deserialize)]
struct RegisterArgs {
    wallet: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct PendingRegistration {
    pub wallet: String,
    pub name: String,
    pub description: String,
}

impl PendingRegistration {
    /// Empty or absent descriptions fall back to `"{name} - AI Agent"`.
    pub fn new(wallet: String, name: String, description: Option<String>) -> Self {
        let description = match description {
            Some(d) if !d.is_empty() => d,
            _ => format!("{name} - AI Agent"),
        };
        Self {
            wallet,
            name,
            description,
        }
    }
}

pub struct RegisterAgentTool;

#[async_trait::async_trait]
impl Tool for RegisterAgentTool {
    fn name(&self) -> &'static str {
        "register_said_agent"
    }

    fn description(&self) -> &'static str {
        "Register a new agent on SAID Protocol with pending status (free, instant)."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "wallet": {
                    "type": "string",
                    "description": "Solana wallet address"
                },
                "name": {
                    "type": "string",
                    "description": "Agent name"
                },
                "description": {
                    "type": "string",
                    "description": "Agent description"
                }
            },
            "required": ["wallet", "name"]
        })
    }

    async fn execute(&self, client: &SaidClient, args: Value) -> String {
        match self.register(client, args).await {
            Ok(ack) => ack.to_string(),
            Err(e) => {
                warn!("register_said_agent failed: {}", e);
                json!({ "success": false, "error": e.to_string() }).to_string()
            }
        }
    }
}

impl RegisterAgentTool {
    async fn register(&self, client: &SaidClient, args: Value) -> ToolResult<Value> {
        let RegisterArgs {
            wallet,
            name,
            description,
        } = parse_args(args)?;
        let payload = PendingRegistration::new(wallet, name, description);

        info!("Registering pending SAID agent {} ({})", payload.name, payload.wallet);
        let result = client.post_json("api/register/pending", &payload).await?;
        acknowledgment(&result)
    }
}

fn acknowledgment(result: &Value) -> ToolResult<Value> {
    let result = result
        .as_object()
        .ok_or_else(|| ToolError::MalformedResponse("registration reply is not an object".into()))?;
    let field = |key: &str| result.get(key).cloned().unwrap_or(Value::Null);
    Ok(json!({
        "success": true,
        "wallet": field("wallet"),
        "pda": field("pda"),
        "profile": field("profile"),
        "status": "PENDING"
    }))
}
