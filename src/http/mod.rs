//! HTTP transport binding
//!
//! Carries the JSON-RPC protocol over HTTP: the `/rpc` dispatch endpoint
//! plus health and discovery metadata endpoints.

pub mod handlers;
