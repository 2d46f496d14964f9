// src/mcp/mod.rs
pub mod dispatcher;
pub mod handler;
pub mod protocol;
pub mod tools;
pub mod stdio;
