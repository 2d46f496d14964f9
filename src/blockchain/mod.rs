// src/blockchain/mod.rs

pub mod abi;
pub mod client;
pub mod evm_client;
pub mod models;
pub mod network;
pub mod services;
pub mod session;
pub mod units;

pub use client::{ChainClient, EvmClient};
pub use network::NetworkProfile;
pub use session::Session;
