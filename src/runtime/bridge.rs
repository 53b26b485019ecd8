use crate::runtime::value::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("wrong number of arguments for {name}() ({received} for {expected})")]
    Arity {
        name: String,
        expected: usize,
        received: usize,
    },
    #[error("{0}")]
    Failure(String),
}

/// What the evaluator requires from its surrounding runtime: a capability
/// query and an invocation, addressed either at the ambient environment
/// (`receiver: None`) or at a value (`receiver: Some(..)`).
pub trait HostBridge {
    fn has_capability(&self, receiver: Option<&Value>, name: &str) -> bool;

    fn invoke(
        &mut self,
        receiver: Option<Value>,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Value, BridgeError>;

    fn is_truthy(&self, value: &Value) -> bool {
        value.as_bool()
    }
}

pub type GlobalFn = Box<dyn FnMut(Vec<Value>) -> Result<Value, BridgeError>>;
pub type MethodFn = Box<dyn FnMut(Value, Vec<Value>) -> Result<Value, BridgeError>>;

#[derive(Default)]
pub struct Registry {
    globals: HashMap<String, GlobalFn>,
    methods: HashMap<(&'static str, String), MethodFn>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global(
        mut self,
        name: impl Into<String>,
        f: impl FnMut(Vec<Value>) -> Result<Value, BridgeError> + 'static,
    ) -> Self {
        self.globals.insert(name.into(), Box::new(f));
        self
    }

    pub fn method(
        mut self,
        type_name: &'static str,
        name: impl Into<String>,
        f: impl FnMut(Value, Vec<Value>) -> Result<Value, BridgeError> + 'static,
    ) -> Self {
        self.methods.insert((type_name, name.into()), Box::new(f));
        self
    }
}

impl HostBridge for Registry {
    fn has_capability(&self, receiver: Option<&Value>, name: &str) -> bool {
        match receiver {
            None => self.globals.contains_key(name),
            Some(value) => self
                .methods
                .contains_key(&(value.type_name(), name.to_string())),
        }
    }

    fn invoke(
        &mut self,
        receiver: Option<Value>,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Value, BridgeError> {
        match receiver {
            None => match self.globals.get_mut(name) {
                Some(f) => f(args),
                None => Err(BridgeError::Failure(format!("no host routine `{name}`"))),
            },
            Some(value) => match self.methods.get_mut(&(value.type_name(), name.to_string())) {
                Some(f) => f(value, args),
                None => Err(BridgeError::Failure(format!(
                    "no `{name}` capability on {}",
                    value.type_name()
                ))),
            },
        }
    }
}
