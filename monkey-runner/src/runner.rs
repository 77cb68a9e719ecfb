use std::path::{Path, PathBuf};

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::repl::evaluator::{AstEvaluator, Evaluator, Failure, InterpreterEvaluator, TokenEvaluator};
use crate::repl::printer::{self, AstPrinter, Printer, TokenPrinter, ValuePrinter};
use crate::Emit;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Program(#[from] Failure),
}

pub fn execute_file(path: &Path, emit: Emit) -> Result<(), RunnerError> {
    let source = std::fs::read_to_string(path).map_err(|source| RunnerError::Io {
        path: path.to_owned(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "running file");

    match emit {
        Emit::Value => execute(InterpreterEvaluator::new(), ValuePrinter, &source),
        Emit::Ast => execute(AstEvaluator, AstPrinter, &source),
        Emit::Tokens => execute(TokenEvaluator, TokenPrinter, &source),
    }
}

fn execute<O, E: Evaluator<Object = O>, P: Printer<Object = O>>(
    mut evaluator: E,
    mut printer: P,
    source: &str,
) -> Result<(), RunnerError> {
    match evaluator.evaluate(source) {
        Ok(object) => {
            printer.print(object);
            Ok(())
        }
        Err(failure) => {
            printer::print_failure(&failure);
            Err(failure.into())
        }
    }
}
