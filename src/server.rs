use crate::client::SaidClient;
use crate::tools::ToolRegistry;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Option<Value>,
    pub id: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            result: Some(result),
            error: None,
            id,
        }
    }

    fn failure(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
            id,
        }
    }
}

pub async fn run(client: SaidClient, tools: ToolRegistry) -> Result<()> {
    info!(
        "MCP Server Ready with {} tools. Waiting for JSON-RPC requests on stdin...",
        tools.names().len()
    );

    serve(io::stdin().lock(), io::stdout(), &client, &tools).await
}

/// Answers one JSON-RPC request per input line until the input ends or a
/// line cannot be read.
pub async fn serve<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    client: &SaidClient,
    tools: &ToolRegistry,
) -> Result<()> {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read request line: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        debug!("Received request: {}", line);

        let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
            Ok(req) => handle_request(&req, client, tools).await,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                Some(JsonRpcResponse::failure(
                    None,
                    -32700,
                    format!("Parse error: {}", e),
                ))
            }
        };

        if let Some(response) = response {
            let response_str = serde_json::to_string(&response)?;
            writeln!(writer, "{}", response_str)?;
            writer.flush()?;
        }
    }

    info!("Input ended, shutting down");
    Ok(())
}

/// Dispatches one request. Notifications produce no response.
pub async fn handle_request(
    req: &JsonRpcRequest,
    client: &SaidClient,
    tools: &ToolRegistry,
) -> Option<JsonRpcResponse> {
    let id = req.id.clone();

    let response = match req.method.as_str() {
        "initialize" => JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        ),
        "initialized" => return None,
        m if m.starts_with("notifications/") => return None,
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tools.definitions() })),
        "tools/call" => {
            let Some(params) = &req.params else {
                return Some(JsonRpcResponse::failure(id, -32602, "Missing params"));
            };
            let Some(tool_name) = params.get("name").and_then(|v| v.as_str()) else {
                return Some(JsonRpcResponse::failure(
                    id,
                    -32602,
                    "Missing 'name' parameter",
                ));
            };
            let args = params.get("arguments").cloned().unwrap_or(json!({}));

            match tools.execute(client, tool_name, args).await {
                Some(text) => JsonRpcResponse::success(id, tool_result(text)),
                None => JsonRpcResponse::failure(
                    id,
                    -32601,
                    format!("Tool not found: {}", tool_name),
                ),
            }
        }
        _ => JsonRpcResponse::failure(id, -32601, "Method not found"),
    };

    Some(response)
}

// MCP text content for compatibility, plus the parsed document for agents.
fn tool_result(text: String) -> Value {
    match serde_json::from_str::<Value>(&text) {
        Ok(data) => json!({
            "content": [{ "type": "text", "text": text }],
            "data": data
        }),
        Err(_) => json!({
            "content": [{ "type": "text", "text": text }]
        }),
    }
}
