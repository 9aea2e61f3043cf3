use anyhow::Context;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_SAID_API_URL: &str = "https://api.saidprotocol.com";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct Config {
    pub rpc_url: String,
    pub said_api_url: String,
    pub workspace: PathBuf,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let rpc_url = env::var("SOLANA_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.into());
        let said_api_url =
            env::var("SAID_API_URL").unwrap_or_else(|_| DEFAULT_SAID_API_URL.into());
        let workspace = match env::var("SAID_WORKSPACE") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => env::current_dir().context("failed to resolve current directory")?,
        };

        Self::new(&rpc_url, &said_api_url, workspace)
    }

    pub fn new(rpc_url: &str, said_api_url: &str, workspace: PathBuf) -> anyhow::Result<Self> {
        Url::parse(rpc_url).with_context(|| format!("invalid SOLANA_RPC_URL: {rpc_url}"))?;
        Url::parse(said_api_url)
            .with_context(|| format!("invalid SAID_API_URL: {said_api_url}"))?;

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            said_api_url: said_api_url.trim_end_matches('/').to_string(),
            workspace,
            timeout: REQUEST_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash_from_api_url() {
        let config = Config::new(
            DEFAULT_RPC_URL,
            "https://api.saidprotocol.com/",
            PathBuf::from("."),
        )
        .unwrap();
        assert_eq!(config.said_api_url, "https://api.saidprotocol.com");
        assert_eq!(config.timeout, REQUEST_TIMEOUT);
    }

    #[test]
    fn test_new_rejects_invalid_rpc_url() {
        let result = Config::new("not a url", DEFAULT_SAID_API_URL, PathBuf::from("."));
        assert!(result.is_err());
    }
}
