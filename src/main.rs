use dotenv::dotenv;
use said_solana_mcp::{client::SaidClient, config::Config, server, tools::ToolRegistry};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting SAID Solana MCP Server...");

    let config = Config::from_env()?;
    info!(
        "Solana RPC: {}, SAID API: {}, workspace: {}",
        config.rpc_url,
        config.said_api_url,
        config.workspace.display()
    );

    let client = SaidClient::new(&config)?;
    let tools = ToolRegistry::new(&config.workspace);

    server::run(client, tools).await?;

    Ok(())
}
