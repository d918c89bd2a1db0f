//! Axum handlers for the web server

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::rpc::dispatch::dispatch;
use crate::rpc::registry::MethodDescriptor;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub rpc_endpoint: &'static str,
    pub methods: Vec<MethodDescriptor>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn discovery(State(state): State<AppState>) -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        rpc_endpoint: "/rpc",
        methods: state.registry.describe(),
    })
}

/// Accepts one request body, dispatches it, and returns whichever envelope
/// results. The dispatcher already produced a JSON value, so this handler
/// cannot fail to serialize.
pub async fn rpc_endpoint(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    Json(dispatch(&state.registry, &body))
}
