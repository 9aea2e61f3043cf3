//! Agent tools for Solana wallet balances and the SAID agent-identity
//! registry, served to an agent host over stdio JSON-RPC.

pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod tools;
