//! Name-to-operation registry
//!
//! Operations are bound behind an explicit capability contract at
//! registration time: each entry declares its parameter kinds and exposes a
//! dynamic `invoke`, so dispatch never inspects the underlying callable.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::errors::HandlerError;
use crate::rpc::coerce::ParamKind;

/// A registered invocable with a fixed parameter signature.
///
/// Invariant: `param_kinds()` has one entry per argument `invoke` consumes,
/// and never changes after registration.
pub trait Operation: Send + Sync {
    fn param_kinds(&self) -> &[ParamKind];

    /// Runs the operation with already-coerced, ordered arguments. Every
    /// returned value is preserved, in order.
    fn invoke(&self, args: Vec<Value>) -> Result<Vec<Value>, HandlerError>;
}

/// Adapter binding a plain function or closure to the [`Operation`]
/// contract together with its declared parameter kinds.
pub struct FnOperation<F> {
    params: Vec<ParamKind>,
    func: F,
}

impl<F> FnOperation<F>
where
    F: Fn(Vec<Value>) -> Result<Vec<Value>, HandlerError> + Send + Sync,
{
    pub fn new(params: Vec<ParamKind>, func: F) -> Self {
        Self { params, func }
    }
}

impl<F> Operation for FnOperation<F>
where
    F: Fn(Vec<Value>) -> Result<Vec<Value>, HandlerError> + Send + Sync,
{
    fn param_kinds(&self) -> &[ParamKind] {
        &self.params
    }

    fn invoke(&self, args: Vec<Value>) -> Result<Vec<Value>, HandlerError> {
        (self.func)(args)
    }
}

/// An object exposing a set of named operations. Registering a service
/// under `name` registers every exposed operation under
/// `"{name}.{operation}"`.
pub trait Service {
    fn operations(&self) -> Vec<(String, Arc<dyn Operation>)>;
}

/// What a registration call binds to a name.
pub enum Target {
    Operation(Arc<dyn Operation>),
    Service(Arc<dyn Service>),
}

impl Target {
    /// Binds a function or closure with the given parameter kinds.
    pub fn function<F>(params: Vec<ParamKind>, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Vec<Value>, HandlerError> + Send + Sync + 'static,
    {
        Self::Operation(Arc::new(FnOperation::new(params, func)))
    }

    pub fn service(service: impl Service + 'static) -> Self {
        Self::Service(Arc::new(service))
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registration name must not be empty")]
    EmptyName,
    #[error("service {service} exposes no operations")]
    NoOperations { service: String },
    #[error("service {service} exposes an operation with an empty name")]
    EmptyOperationName { service: String },
}

/// One registry entry as listed by the discovery endpoint.
#[derive(Debug, Serialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub params: Vec<ParamKind>,
}

/// The name-to-operation mapping used for dispatch resolution.
///
/// Built incrementally during setup (`register` needs `&mut`), then
/// published read-only for the server's lifetime by wrapping it in an
/// `Arc`. Registering an existing name silently replaces the previous
/// entry.
#[derive(Default)]
pub struct Registry {
    methods: HashMap<String, Arc<dyn Operation>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, target: Target) -> Result<(), RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        match target {
            Target::Operation(operation) => {
                self.methods.insert(name.to_string(), operation);
            }
            Target::Service(service) => {
                let operations = service.operations();
                if operations.is_empty() {
                    return Err(RegistryError::NoOperations {
                        service: name.to_string(),
                    });
                }
                for (operation_name, _) in &operations {
                    if operation_name.trim().is_empty() {
                        return Err(RegistryError::EmptyOperationName {
                            service: name.to_string(),
                        });
                    }
                }
                for (operation_name, operation) in operations {
                    self.methods
                        .insert(format!("{name}.{operation_name}"), operation);
                }
            }
        }

        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn Operation> {
        self.methods.get(name).map(AsRef::as_ref)
    }

    /// Lists registered methods with their parameter kinds, sorted by name.
    pub fn describe(&self) -> Vec<MethodDescriptor> {
        let mut descriptors: Vec<MethodDescriptor> = self
            .methods
            .iter()
            .map(|(name, operation)| MethodDescriptor {
                name: name.clone(),
                params: operation.param_kinds().to_vec(),
            })
            .collect();
        descriptors.sort_by(|left, right| left.name.cmp(&right.name));
        descriptors
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use super::{Operation, Registry, RegistryError, Service, Target};
    use crate::rpc::coerce::ParamKind;

    fn echo_target() -> Target {
        Target::function(vec![ParamKind::Str], |args| Ok(args))
    }

    struct Clock;

    impl Service for Clock {
        fn operations(&self) -> Vec<(String, Arc<dyn Operation>)> {
            vec![
                (
                    "now".to_string(),
                    Arc::new(super::FnOperation::new(vec![], |_: Vec<Value>| {
                        Ok(vec![json!(0)])
                    })) as Arc<dyn Operation>,
                ),
                (
                    "offset".to_string(),
                    Arc::new(super::FnOperation::new(
                        vec![ParamKind::I64],
                        |args: Vec<Value>| Ok(args),
                    )) as Arc<dyn Operation>,
                ),
            ]
        }
    }

    struct Hollow;

    impl Service for Hollow {
        fn operations(&self) -> Vec<(String, Arc<dyn Operation>)> {
            vec![]
        }
    }

    #[test]
    fn registered_function_keeps_declared_kinds() {
        let mut registry = Registry::new();
        registry.register("echo", echo_target()).expect("register");

        let operation = registry.lookup("echo").expect("registered method");
        assert_eq!(operation.param_kinds(), &[ParamKind::Str]);
    }

    #[test]
    fn service_operations_register_under_composite_keys() {
        let mut registry = Registry::new();
        registry
            .register("clock", Target::service(Clock))
            .expect("register");

        assert_eq!(registry.len(), 2);
        assert!(registry.lookup("clock.now").is_some());
        let offset = registry.lookup("clock.offset").expect("registered method");
        assert_eq!(offset.param_kinds(), &[ParamKind::I64]);
        assert!(registry.lookup("clock").is_none());
    }

    #[test]
    fn lookup_of_unknown_name_is_none() {
        let registry = Registry::new();
        assert!(registry.lookup("missing").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn duplicate_registration_replaces_previous_entry() {
        let mut registry = Registry::new();
        registry.register("echo", echo_target()).expect("register");
        registry
            .register(
                "echo",
                Target::function(vec![ParamKind::I64, ParamKind::I64], |args| Ok(args)),
            )
            .expect("re-register");

        let operation = registry.lookup("echo").expect("registered method");
        assert_eq!(operation.param_kinds(), &[ParamKind::I64, ParamKind::I64]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_name_is_a_recoverable_error() {
        let mut registry = Registry::new();
        let error = registry
            .register("  ", echo_target())
            .expect_err("empty name must fail");
        assert!(matches!(error, RegistryError::EmptyName));
    }

    #[test]
    fn service_without_operations_is_a_recoverable_error() {
        let mut registry = Registry::new();
        let error = registry
            .register("hollow", Target::service(Hollow))
            .expect_err("empty service must fail");
        assert!(matches!(error, RegistryError::NoOperations { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn describe_lists_methods_sorted_by_name() {
        let mut registry = Registry::new();
        registry
            .register("clock", Target::service(Clock))
            .expect("register");
        registry.register("echo", echo_target()).expect("register");

        let descriptors = registry.describe();
        let names: Vec<&str> = descriptors
            .iter()
            .map(|descriptor| descriptor.name.as_str())
            .collect();
        assert_eq!(names, vec!["clock.now", "clock.offset", "echo"]);
    }
}
