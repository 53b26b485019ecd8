use crate::language::ast::{FunctionDef, Node, NodeKind, Root};
use crate::language::span::SourcePos;
use crate::runtime::bridge::{BridgeError, HostBridge, Registry};
use crate::runtime::value::Value;

pub const FILE: &str = "main.rl";

pub fn pos(line: u32) -> SourcePos {
    SourcePos::new(FILE, line)
}

pub fn int(value: i64, line: u32) -> Node {
    Node::new(NodeKind::Literal(Value::Int(value)), pos(line))
}

pub fn string(text: &str, line: u32) -> Node {
    Node::new(NodeKind::StringLiteral(text.to_string()), pos(line))
}

pub fn var(name: &str, line: u32) -> Node {
    Node::new(NodeKind::VariableRef(name.to_string()), pos(line))
}

pub fn assign(name: &str, value: Node, line: u32) -> Node {
    Node::new(
        NodeKind::Assign {
            name: name.to_string(),
            value: Box::new(value),
        },
        pos(line),
    )
}

pub fn call(name: &str, args: Vec<Node>, line: u32) -> Node {
    Node::new(
        NodeKind::Call {
            name: name.to_string(),
            args,
        },
        pos(line),
    )
}

pub fn def(name: &str, params: &[&str], body: Vec<Node>, line: u32) -> Node {
    let func = FunctionDef {
        params: params.iter().map(|p| p.to_string()).collect(),
        body,
        pos: pos(line),
    };
    Node::new(
        NodeKind::Def {
            name: name.to_string(),
            func,
        },
        pos(line),
    )
}

pub fn if_else(cond: Node, then_body: Vec<Node>, else_body: Option<Vec<Node>>, line: u32) -> Node {
    Node::new(
        NodeKind::If {
            cond: Box::new(cond),
            then_body,
            else_body,
        },
        pos(line),
    )
}

pub fn while_loop(cond: Node, body: Vec<Node>, line: u32) -> Node {
    Node::new(
        NodeKind::While {
            cond: Box::new(cond),
            body,
        },
        pos(line),
    )
}

pub fn root(stmts: Vec<Node>) -> Root {
    Root::new(stmts)
}

pub fn int_method(
    name: &'static str,
    op: fn(i64, i64) -> i64,
) -> impl FnMut(Value, Vec<Value>) -> Result<Value, BridgeError> {
    move |recv, args| {
        let lhs = match recv {
            Value::Int(v) => v,
            other => {
                return Err(BridgeError::Failure(format!(
                    "{name} expects an int receiver, got {}",
                    other.type_name()
                )))
            }
        };
        match args.as_slice() {
            [Value::Int(rhs)] => Ok(Value::Int(op(lhs, *rhs))),
            _ => Err(BridgeError::Arity {
                name: name.to_string(),
                expected: 1,
                received: args.len(),
            }),
        }
    }
}

pub fn arith_host() -> Registry {
    Registry::new()
        .method("int", "plus", int_method("plus", |a, b| a + b))
        .method("int", "minus", int_method("minus", |a, b| a - b))
}

pub struct RecordingBridge {
    inner: Registry,
    pub log: Vec<String>,
}

impl RecordingBridge {
    pub fn new(inner: Registry) -> Self {
        Self {
            inner,
            log: Vec::new(),
        }
    }
}

impl HostBridge for RecordingBridge {
    fn has_capability(&self, receiver: Option<&Value>, name: &str) -> bool {
        self.inner.has_capability(receiver, name)
    }

    fn invoke(
        &mut self,
        receiver: Option<Value>,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Value, BridgeError> {
        let target = receiver.as_ref().map(Value::type_name).unwrap_or("env");
        let rendered: Vec<String> = args.iter().map(Value::to_string).collect();
        self.log.push(format!("{target}.{name}({})", rendered.join(", ")));
        self.inner.invoke(receiver, name, args)
    }
}
