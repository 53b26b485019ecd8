use crate::language::ast::{FunctionDef, Node, NodeKind, Root};
use crate::language::span::SourcePos;
use crate::runtime::bridge::{BridgeError, HostBridge};
use crate::runtime::environment::{CallStack, Frame};
use crate::runtime::error::{EvalError, EvalResult};
use crate::runtime::value::Value;
use std::collections::HashMap;
use tracing::{debug, trace};

pub fn evaluate<H: HostBridge>(root: &Root, host: &mut H) -> EvalResult<Value> {
    let mut core = Core::new(host);
    core.exec_list(&root.stmts)
}

pub struct Core<'p, H: HostBridge> {
    host: &'p mut H,
    functions: HashMap<&'p str, &'p FunctionDef>,
    stack: CallStack<'p>,
}

impl<'p, H: HostBridge> Core<'p, H> {
    pub fn new(host: &'p mut H) -> Self {
        Self {
            host,
            functions: HashMap::new(),
            stack: CallStack::new(),
        }
    }

    pub fn frame(&self) -> &Frame<'p> {
        self.stack.active()
    }

    pub fn frame_mut(&mut self) -> &mut Frame<'p> {
        self.stack.active_mut()
    }

    pub fn define_function(&mut self, name: &'p str, func: &'p FunctionDef) -> EvalResult<()> {
        if self.functions.contains_key(name) {
            return Err(EvalError::DefinitionConflict {
                name: name.to_string(),
            });
        }
        debug!(function = name, "registered user function");
        self.functions.insert(name, func);
        Ok(())
    }

    pub fn exec_list(&mut self, stmts: &'p [Node]) -> EvalResult<Value> {
        let mut last = Value::Unit;
        for stmt in stmts {
            last = self.eval(stmt)?;
        }
        Ok(last)
    }

    pub fn eval(&mut self, node: &'p Node) -> EvalResult<Value> {
        match &node.kind {
            NodeKind::Literal(value) => Ok(value.clone()),
            NodeKind::StringLiteral(text) => Ok(Value::string(text.clone())),
            NodeKind::VariableRef(name) => self.eval_variable(name, &node.pos),
            NodeKind::Assign { name, value } => {
                let value = self.eval(value)?;
                self.frame_mut().assign(name, value.clone());
                Ok(value)
            }
            NodeKind::If {
                cond,
                then_body,
                else_body,
            } => {
                let cond = self.eval(cond)?;
                if self.host.is_truthy(&cond) {
                    self.exec_list(then_body)
                } else if let Some(body) = else_body {
                    self.exec_list(body)
                } else {
                    Ok(Value::Unit)
                }
            }
            NodeKind::While { cond, body } => {
                loop {
                    let check = self.eval(cond)?;
                    if !self.host.is_truthy(&check) {
                        break;
                    }
                    self.exec_list(body)?;
                }
                Ok(Value::Unit)
            }
            NodeKind::Def { name, func } => {
                self.define_function(name, func)?;
                Ok(Value::Unit)
            }
            NodeKind::Call { name, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg)?);
                }
                self.resolve_call(name, values, &node.pos)
            }
        }
    }

    fn eval_variable(&mut self, name: &'p str, pos: &SourcePos) -> EvalResult<Value> {
        if let Some(value) = self.frame().get(name) {
            return Ok(value);
        }
        match self.resolve_call(name, Vec::new(), pos) {
            Err(EvalError::UnresolvedCall { .. }) => Err(EvalError::UnknownName {
                name: name.to_string(),
                pos: pos.clone(),
            }),
            result => result,
        }
    }

    pub fn resolve_call(
        &mut self,
        name: &'p str,
        mut args: Vec<Value>,
        pos: &SourcePos,
    ) -> EvalResult<Value> {
        if let Some(&func) = self.functions.get(name) {
            trace!(function = name, "resolved to user function");
            return self.call_user(name, func, args, pos);
        }
        if self.host.has_capability(None, name) {
            trace!(routine = name, "resolved to host routine");
            return self.invoke_host(None, name, args, pos);
        }
        if !args.is_empty() && self.host.has_capability(Some(&args[0]), name) {
            trace!(method = name, "resolved to receiver capability");
            let receiver = args.remove(0);
            return self.invoke_host(Some(receiver), name, args, pos);
        }
        Err(EvalError::UnresolvedCall {
            name: name.to_string(),
            pos: pos.clone(),
        })
    }

    fn call_user(
        &mut self,
        name: &'p str,
        func: &'p FunctionDef,
        args: Vec<Value>,
        pos: &SourcePos,
    ) -> EvalResult<Value> {
        if args.len() != func.params.len() {
            return Err(EvalError::ArityMismatch {
                name: name.to_string(),
                expected: func.params.len(),
                received: args.len(),
                pos: pos.clone(),
            });
        }
        let mut frame = Frame::new(name);
        for (param, value) in func.params.iter().zip(args) {
            frame.assign(param, value);
        }
        self.stack.push(frame);
        trace!(function = name, depth = self.stack.depth(), "entering frame");
        let result = self.exec_list(&func.body);
        self.stack.pop();
        trace!(function = name, depth = self.stack.depth(), "left frame");
        result
    }

    fn invoke_host(
        &mut self,
        receiver: Option<Value>,
        name: &str,
        args: Vec<Value>,
        pos: &SourcePos,
    ) -> EvalResult<Value> {
        match self.host.invoke(receiver, name, args) {
            Ok(value) => Ok(value),
            Err(BridgeError::Arity {
                name,
                expected,
                received,
            }) => Err(EvalError::ArityMismatch {
                name,
                expected,
                received,
                pos: pos.clone(),
            }),
            Err(err) => Err(EvalError::Environment(err)),
        }
    }
}
