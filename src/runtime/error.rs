use crate::language::span::SourcePos;
use crate::runtime::bridge::BridgeError;
use miette::Diagnostic;
use thiserror::Error;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Error, Diagnostic)]
pub enum EvalError {
    #[error("function `{name}` defined twice")]
    #[diagnostic(code(rill::definition_conflict))]
    DefinitionConflict { name: String },

    #[error("in {pos}: undefined function or method `{name}`")]
    #[diagnostic(
        code(rill::unresolved_call),
        help("no user function, host routine, or receiver capability matches `{name}`")
    )]
    UnresolvedCall { name: String, pos: SourcePos },

    #[error("in {pos}: unknown method or local variable `{name}`")]
    #[diagnostic(code(rill::unknown_name))]
    UnknownName { name: String, pos: SourcePos },

    #[error("in {pos}: wrong number of arguments for {name}() ({received} for {expected})")]
    #[diagnostic(code(rill::arity_mismatch))]
    ArityMismatch {
        name: String,
        expected: usize,
        received: usize,
        pos: SourcePos,
    },

    #[error(transparent)]
    #[diagnostic(
        code(rill::environment),
        help("the failure originated inside a host capability, not in the evaluated program")
    )]
    Environment(BridgeError),
}
