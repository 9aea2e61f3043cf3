use super::{parse_args, Tool};
use crate::client::SaidClient;
use crate::error::{ToolError, ToolResult};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
const SOL_DECIMALS: u32 = 9;

#[derive(Deserialize)]
struct BalanceArgs {
    address: String,
}

pub struct GetBalanceTool;

#[async_trait::async_trait]
impl Tool for GetBalanceTool {
    fn name(&self) -> &'static str {
        "get_sol_balance"
    }

    fn description(&self) -> &'static str {
        "Get SOL balance for a Solana wallet address. Returns balance in SOL."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "address": {
                    "type": "string",
                    "description": "Solana wallet address (base58)"
                }
            },
            "required": ["address"]
        })
    }

    async fn execute(&self, client: &SaidClient, args: Value) -> String {
        match self.fetch(client, args).await {
            Ok(result) => result.to_string(),
            Err(e) => {
                warn!("get_sol_balance failed: {}", e);
                json!({ "error": e.to_string() }).to_string()
            }
        }
    }
}

impl GetBalanceTool {
    async fn fetch(&self, client: &SaidClient, args: Value) -> ToolResult<Value> {
        let BalanceArgs { address } = parse_args(args)?;
        let response = client.rpc_call("getBalance", json!([address])).await?;
        balance_from_response(&address, response)
    }
}

/// Shapes a `getBalance` envelope. An RPC-level `error` is passed back
/// verbatim as a successful document.
fn balance_from_response(address: &str, mut response: Value) -> ToolResult<Value> {
    if response.get("result").is_none() {
        let error = response
            .get_mut("error")
            .map(Value::take)
            .unwrap_or_else(|| json!("Unknown error"));
        return Ok(json!({ "error": error }));
    }

    let lamports = response["result"]
        .get("value")
        .and_then(Value::as_u64)
        .ok_or_else(|| ToolError::MalformedResponse("missing result.value".into()))?;
    let sol = sol_as_f64(lamports)
        .ok_or_else(|| ToolError::MalformedResponse(format!("unrepresentable balance {lamports}")))?;

    Ok(json!({
        "address": address,
        "balance_sol": sol,
        "balance_lamports": lamports
    }))
}

pub fn lamports_to_sol(lamports: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(lamports), SOL_DECIMALS).normalize()
}

/// Nearest `f64` to the exact SOL amount, rounded from the full decimal text.
pub fn sol_as_f64(lamports: u64) -> Option<f64> {
    lamports_to_sol(lamports).to_string().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lamports_to_sol() {
        assert_eq!(lamports_to_sol(1_500_000_000), dec!(1.5));
        assert_eq!(lamports_to_sol(0), Decimal::ZERO);
        assert_eq!(lamports_to_sol(1), dec!(0.000000001));
        assert_eq!(lamports_to_sol(LAMPORTS_PER_SOL), Decimal::ONE);
        assert_eq!(lamports_to_sol(u64::MAX), dec!(18446744073.709551615));
    }

    #[test]
    fn test_sol_as_f64_is_correctly_rounded() {
        assert_eq!(sol_as_f64(1_500_000_000), Some(1.5));
        assert_eq!(
            sol_as_f64(4_410_016_074_084_845),
            Some(4_410_016_074_084_845u64 as f64 / 1e9)
        );
        assert_eq!(sol_as_f64(4_410_016_074_084_845), Some(4410016.074084845));
        assert_eq!(sol_as_f64(0), Some(0.0));
    }

    #[test]
    fn test_large_balance_from_result() {
        let response =
            json!({"jsonrpc": "2.0", "id": 1, "result": {"value": 4_410_016_074_084_845u64}});
        let out = balance_from_response("whale", response).unwrap();
        assert_eq!(out["balance_sol"], 4410016.074084845);
    }

    #[test]
    fn test_balance_from_result() {
        let response = json!({"jsonrpc": "2.0", "id": 1, "result": {"context": {"slot": 1}, "value": 1_500_000_000u64}});
        let out = balance_from_response("Wa11et", response).unwrap();
        assert_eq!(out["address"], "Wa11et");
        assert_eq!(out["balance_sol"], 1.5);
        assert_eq!(out["balance_lamports"], 1_500_000_000u64);
    }

    #[test]
    fn test_rpc_error_is_passed_through() {
        let rpc_error = json!({"code": -32602, "message": "Invalid param: WrongSize"});
        let response = json!({"jsonrpc": "2.0", "id": 1, "error": rpc_error.clone()});
        let out = balance_from_response("bad", response).unwrap();
        assert_eq!(out, json!({ "error": rpc_error }));
    }

    #[test]
    fn test_missing_result_and_error() {
        let out = balance_from_response("x", json!({"jsonrpc": "2.0", "id": 1})).unwrap();
        assert_eq!(out, json!({"error": "Unknown error"}));
    }

    #[test]
    fn test_result_without_value_is_malformed() {
        let err = balance_from_response("x", json!({"result": {}})).unwrap_err();
        assert!(matches!(err, ToolError::MalformedResponse(_)));
    }
}
