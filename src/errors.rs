use thiserror::Error;

use crate::rpc::coerce::CoerceError;
use crate::rpc::protocol;

/// Failure raised by a registered operation while it runs.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Terminal failure of one dispatch. Each variant maps onto exactly one
/// JSON-RPC error code; the display text becomes the envelope message.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    Parse(String),
    #[error("Method Not Found.")]
    MethodNotFound,
    #[error("expected {expected} parameters, got {supplied}")]
    Arity { expected: usize, supplied: usize },
    #[error(transparent)]
    Coerce(#[from] CoerceError),
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl DispatchError {
    pub fn code(&self) -> i64 {
        match self {
            Self::Parse(_) => protocol::PARSE_ERROR,
            Self::MethodNotFound => protocol::METHOD_NOT_FOUND,
            Self::Arity { .. } | Self::Coerce(_) => protocol::INVALID_PARAMS,
            Self::Handler(_) => protocol::INTERNAL_ERROR,
        }
    }
}
