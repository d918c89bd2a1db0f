//! Request dispatcher
//!
//! Orchestrates one request: decode envelope, resolve the operation, check
//! arity, coerce each argument, invoke, and assemble the response or error
//! envelope. Every dispatch yields exactly one envelope; requests are
//! stateless with respect to the registry and to each other.

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::DispatchError;
use crate::rpc::coerce::coerce;
use crate::rpc::protocol::{ErrorResponse, Request, Response};
use crate::rpc::registry::Registry;

/// Runs one raw request body against the registry and returns the response
/// envelope as a JSON value.
pub fn dispatch(registry: &Registry, body: &[u8]) -> Value {
    let request: Request = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(err) => return failure("", DispatchError::Parse(err.to_string())),
    };

    let method = request.method.clone();
    match execute(registry, request) {
        Ok(response) => {
            info!(method = %method, outcome = "success", "rpc dispatched");
            serde_json::to_value(response).expect("response envelope serialization")
        }
        Err(err) => failure(&method, err),
    }
}

fn execute(registry: &Registry, request: Request) -> Result<Response, DispatchError> {
    let operation = registry
        .lookup(&request.method)
        .ok_or(DispatchError::MethodNotFound)?;

    let expected = operation.param_kinds();
    if request.params.len() != expected.len() {
        return Err(DispatchError::Arity {
            expected: expected.len(),
            supplied: request.params.len(),
        });
    }

    let mut args = Vec::with_capacity(expected.len());
    for (value, kind) in request.params.iter().zip(expected) {
        args.push(coerce(value, *kind)?);
    }

    let result = operation.invoke(args)?;
    Ok(Response::new(request.id, result))
}

fn failure(method: &str, err: DispatchError) -> Value {
    let code = err.code();
    warn!(method = %method, code, error = %err, "rpc dispatch failed");
    serde_json::to_value(ErrorResponse::new(code, err.to_string()))
        .expect("error envelope serialization")
}
