use std::sync::Arc;

use jsonrpc_server::{
    build_app,
    config::Config,
    errors::HandlerError,
    logging,
    rpc::coerce::ParamKind,
    rpc::registry::{FnOperation, Operation, Registry, RegistryError, Service, Target},
    AppState,
};
use serde_json::{json, Value};
use tracing::info;

/// Demonstration service: one registration call populates `math.add` and
/// `math.divmod`.
struct Math;

impl Service for Math {
    fn operations(&self) -> Vec<(String, Arc<dyn Operation>)> {
        vec![
            (
                "add".to_string(),
                Arc::new(FnOperation::new(
                    vec![ParamKind::I64, ParamKind::I64],
                    |args: Vec<Value>| {
                        let left = args[0].as_i64().unwrap_or_default();
                        let right = args[1].as_i64().unwrap_or_default();
                        let sum = left
                            .checked_add(right)
                            .ok_or_else(|| HandlerError::new("addition overflow"))?;
                        Ok(vec![json!(sum)])
                    },
                )) as Arc<dyn Operation>,
            ),
            (
                "divmod".to_string(),
                Arc::new(FnOperation::new(
                    vec![ParamKind::I64, ParamKind::I64],
                    |args: Vec<Value>| {
                        let dividend = args[0].as_i64().unwrap_or_default();
                        let divisor = args[1].as_i64().unwrap_or_default();
                        if divisor == 0 {
                            return Err(HandlerError::new("division by zero"));
                        }
                        Ok(vec![json!(dividend / divisor), json!(dividend % divisor)])
                    },
                )) as Arc<dyn Operation>,
            ),
        ]
    }
}

fn build_registry() -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();
    registry.register("echo", Target::function(vec![ParamKind::Str], |args| Ok(args)))?;
    registry.register("math", Target::service(Math))?;
    Ok(registry)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let registry = build_registry()?;
    let bind_socket = config.bind_socket()?;

    info!(methods = registry.len(), "registry published");

    let state = AppState::new(registry);
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
