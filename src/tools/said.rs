//! Read-only SAID registry lookups keyed by wallet address.

use super::{parse_args, Tool};
use crate::client::SaidClient;
use crate::error::{ToolError, ToolResult};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

pub const PROFILE_BASE_URL: &str = "https://www.saidprotocol.com/agent.html";

#[derive(Deserialize)]
struct WalletArgs {
    wallet: String,
}

fn wallet_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "wallet": {
                "type": "string",
                "description": description
            }
        },
        "required": ["wallet"]
    })
}

pub fn profile_url(wallet: &str) -> String {
    format!("{PROFILE_BASE_URL}?wallet={wallet}")
}

pub struct VerifyAgentTool;

#[async_trait::async_trait]
impl Tool for VerifyAgentTool {
    fn name(&self) -> &'static str {
        "verify_said_agent"
    }

    fn description(&self) -> &'static str {
        "Verify if a wallet address is a registered SAID agent. Use before transacting with unknown agents."
    }

    fn schema(&self) -> Value {
        wallet_schema("Solana wallet address to verify")
    }

    async fn execute(&self, client: &SaidClient, args: Value) -> String {
        match self.verify(client, args).await {
            Ok(record) => record.to_string(),
            Err(e) if e.is_not_found() => json!({
                "verified": false,
                "error": "Agent not found in SAID registry"
            })
            .to_string(),
            Err(e) => {
                warn!("verify_said_agent failed: {}", e);
                json!({ "verified": false, "error": e.to_string() }).to_string()
            }
        }
    }
}

impl VerifyAgentTool {
    async fn verify(&self, client: &SaidClient, args: Value) -> ToolResult<Value> {
        let WalletArgs { wallet } = parse_args(args)?;
        let agent = client.get_json(&format!("api/agents/{wallet}")).await?;
        verification_record(&wallet, &agent)
    }
}

/// Reshapes a registry agent record; absent upstream fields become `null`.
fn verification_record(wallet: &str, agent: &Value) -> ToolResult<Value> {
    let agent = agent
        .as_object()
        .ok_or_else(|| ToolError::MalformedResponse("agent record is not an object".into()))?;
    let field = |key: &str| agent.get(key).cloned().unwrap_or(Value::Null);
    Ok(json!({
        "verified": true,
        "name": field("name"),
        "wallet": field("wallet"),
        "pda": field("pda"),
        "isVerified": field("isVerified"),
        "reputationScore": field("reputationScore"),
        "description": field("description"),
        "profile": profile_url(wallet)
    }))
}

pub struct LookupAgentTool;

#[async_trait::async_trait]
impl Tool for LookupAgentTool {
    fn name(&self) -> &'static str {
        "lookup_said_agent"
    }

    fn description(&self) -> &'static str {
        "Get full SAID profile for an agent by wallet address, including reputation and skills."
    }

    fn schema(&self) -> Value {
        wallet_schema("Solana wallet address to lookup")
    }

    async fn execute(&self, client: &SaidClient, args: Value) -> String {
        let result = match parse_args::<WalletArgs>(args) {
            Ok(WalletArgs { wallet }) => client.get_text(&format!("api/agents/{wallet}")).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(body) => body,
            Err(e) if e.is_not_found() => json!({ "error": "Agent not found" }).to_string(),
            Err(e) => {
                warn!("lookup_said_agent failed: {}", e);
                json!({ "error": e.to_string() }).to_string()
            }
        }
    }
}

pub struct GetTrustScoreTool;

#[async_trait::async_trait]
impl Tool for GetTrustScoreTool {
    fn name(&self) -> &'static str {
        "get_trust_score"
    }

    fn description(&self) -> &'static str {
        "Get the trust score and trust network for a SAID agent."
    }

    fn schema(&self) -> Value {
        wallet_schema("Solana wallet address")
    }

    async fn execute(&self, client: &SaidClient, args: Value) -> String {
        let result = match parse_args::<WalletArgs>(args) {
            Ok(WalletArgs { wallet }) => client.get_text(&format!("api/trust/{wallet}")).await,
            Err(e) => Err(e),
        };

        // Every fault, 404 included, collapses into the same shape.
        result.unwrap_or_else(|e| {
            warn!("get_trust_score failed: {}", e);
            json!({ "error": e.to_string() }).to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_record_renames_fields() {
        let agent = json!({
            "name": "Scout",
            "wallet": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin",
            "pda": "Pda111",
            "isVerified": true,
            "reputationScore": 87,
            "description": "Market scout",
            "skills": ["search"]
        });
        let record =
            verification_record("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin", &agent).unwrap();

        assert_eq!(record["verified"], true);
        assert_eq!(record["name"], "Scout");
        assert_eq!(record["reputationScore"], 87);
        assert!(record.get("skills").is_none());
        assert_eq!(
            record["profile"],
            "https://www.saidprotocol.com/agent.html?wallet=9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin"
        );
    }

    #[test]
    fn test_verification_record_nulls_missing_fields() {
        let record = verification_record("w", &json!({})).unwrap();
        assert_eq!(record["verified"], true);
        assert!(record["name"].is_null());
        assert!(record["pda"].is_null());
        assert_eq!(record["profile"], profile_url("w"));
    }

    #[test]
    fn test_verification_record_rejects_non_object() {
        for body in [json!(null), json!([]), json!("x")] {
            let err = verification_record("w", &body).unwrap_err();
            assert!(matches!(err, ToolError::MalformedResponse(_)));
        }
    }
}
