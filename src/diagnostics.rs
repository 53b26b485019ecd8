use crate::language::ast::Root;
use crate::runtime::bridge::HostBridge;
use crate::runtime::error::EvalError;
use crate::runtime::evaluate;
use miette::Report;

pub fn report_eval_error(program_name: &str, error: &EvalError) {
    eprintln!("{}: {}", program_name, error);
}

pub fn emit_eval_error(error: EvalError) {
    eprintln!("{:?}", Report::new(error));
}

pub fn run_program<H: HostBridge>(root: &Root, host: &mut H, program_name: &str) -> i32 {
    match evaluate(root, host) {
        Ok(_) => 0,
        Err(error) => {
            report_eval_error(program_name, &error);
            1
        }
    }
}
