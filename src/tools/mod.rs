pub mod balance;
pub mod identity;
pub mod register;
pub mod said;

use crate::client::SaidClient;
use crate::error::{ToolError, ToolResult};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub use balance::GetBalanceTool;
pub use identity::GetMyIdentityTool;
pub use register::RegisterAgentTool;
pub use said::{GetTrustScoreTool, LookupAgentTool, VerifyAgentTool};

/// A callable exposed to the agent host. `execute` always yields a JSON
/// document; failures are reported inside it rather than as `Err`.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn schema(&self) -> Value;
    async fn execute(&self, client: &SaidClient, args: Value) -> String;
}

type Constructor = fn(&Path) -> Box<dyn Tool>;

fn balance_tool(_: &Path) -> Box<dyn Tool> {
    Box::new(GetBalanceTool)
}

fn verify_tool(_: &Path) -> Box<dyn Tool> {
    Box::new(VerifyAgentTool)
}

fn lookup_tool(_: &Path) -> Box<dyn Tool> {
    Box::new(LookupAgentTool)
}

fn trust_tool(_: &Path) -> Box<dyn Tool> {
    Box::new(GetTrustScoreTool)
}

fn register_tool(_: &Path) -> Box<dyn Tool> {
    Box::new(RegisterAgentTool)
}

fn identity_tool(workspace: &Path) -> Box<dyn Tool> {
    Box::new(GetMyIdentityTool::new(workspace))
}

const BUILTIN_TOOLS: &[Constructor] = &[
    balance_tool,
    verify_tool,
    lookup_tool,
    trust_tool,
    register_tool,
    identity_tool,
];

/// Fixed set of tools, built once at startup and read-only afterwards.
pub struct ToolRegistry {
    tools: HashMap<&'static str, Box<dyn Tool>>,
    order: Vec<&'static str>,
}

impl ToolRegistry {
    pub fn new(workspace: &Path) -> Self {
        let mut tools = HashMap::new();
        let mut order = Vec::with_capacity(BUILTIN_TOOLS.len());

        for construct in BUILTIN_TOOLS {
            let tool = construct(workspace);
            order.push(tool.name());
            tools.insert(tool.name(), tool);
        }

        Self { tools, order }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn names(&self) -> &[&'static str] {
        &self.order
    }

    pub fn definitions(&self) -> Vec<Value> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| {
                json!({
                    "name": t.name(),
                    "description": t.description(),
                    "inputSchema": t.schema()
                })
            })
            .collect()
    }

    pub async fn execute(&self, client: &SaidClient, name: &str, args: Value) -> Option<String> {
        let tool = self.get(name)?;
        Some(tool.execute(client, args).await)
    }
}

pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> ToolResult<T> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct WalletOnly {
        #[allow(dead_code)]
        wallet: String,
    }

    #[test]
    fn test_registry_holds_all_tools_in_order() {
        let registry = ToolRegistry::new(Path::new("."));
        assert_eq!(
            registry.names(),
            &[
                "get_sol_balance",
                "verify_said_agent",
                "lookup_said_agent",
                "get_trust_score",
                "register_said_agent",
                "get_my_said_identity",
            ]
        );
        assert!(registry.get("get_trust_score").is_some());
        assert!(registry.get("swap_tokens").is_none());
    }

    #[test]
    fn test_definitions_carry_schemas() {
        let registry = ToolRegistry::new(Path::new("."));
        let defs = registry.definitions();
        assert_eq!(defs.len(), 6);
        for def in &defs {
            assert_eq!(def["inputSchema"]["type"], "object");
            assert!(!def["description"].as_str().unwrap().is_empty());
        }
        assert_eq!(defs[4]["inputSchema"]["required"], json!(["wallet", "name"]));
    }

    #[test]
    fn test_parse_args_reports_missing_field() {
        let err = parse_args::<WalletOnly>(json!({})).err().unwrap();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(err.to_string().contains("wallet"));

        let err = parse_args::<WalletOnly>(Value::Null).err().unwrap();
        assert!(err.to_string().starts_with("invalid arguments"));
    }
}
