//! Typed bindings for the node's HTTP RPC API.
//!
//! Every endpoint gets a request type implementing [`client::ApiRequest`]
//! and, where the node answers with JSON, an explicit response schema.

pub mod client;
pub mod v0;
