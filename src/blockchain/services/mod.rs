// src/blockchain/services/mod.rs

pub mod approve;
pub mod balance;
pub mod network_info;
pub mod quote;
pub mod swap;
pub mod token;
pub mod wallet;
