pub mod evaluator;
pub mod printer;
mod reader;

use std::ops::ControlFlow;

use rustyline::error::ReadlineError;

use evaluator::{AstEvaluator, Evaluator, InterpreterEvaluator, TokenEvaluator};
use printer::{AstPrinter, Printer, TokenPrinter, ValuePrinter};
use reader::{ReadOutput, Reader};

use crate::runner::RunnerError;
use crate::Emit;

struct Repl<E: Evaluator, P: Printer> {
    reader: Reader,
    evaluator: E,
    printer: P,
}

impl<O, E: Evaluator<Object = O>, P: Printer<Object = O>> Repl<E, P> {
    fn run(mut self) -> Result<(), ReadlineError> {
        loop {
            let input = self.reader.read()?;
            match input {
                ReadOutput::ControlFlow(ControlFlow::Break(())) => break,
                ReadOutput::ControlFlow(ControlFlow::Continue(())) => continue,
                // Failures are shown and the session goes on.
                ReadOutput::Value(source) => match self.evaluator.evaluate(&source) {
                    Ok(object) => self.printer.print(object),
                    Err(failure) => printer::print_failure(&failure),
                },
            }
        }
        Ok(())
    }
}

pub fn start(emit: Emit) -> Result<(), RunnerError> {
    let reader = Reader::new()?;

    match emit {
        Emit::Value => Repl {
            reader,
            evaluator: InterpreterEvaluator::new(),
            printer: ValuePrinter,
        }
        .run()?,
        Emit::Ast => Repl {
            reader,
            evaluator: AstEvaluator,
            printer: AstPrinter,
        }
        .run()?,
        Emit::Tokens => Repl {
            reader,
            evaluator: TokenEvaluator,
            printer: TokenPrinter,
        }
        .run()?,
    };
    Ok(())
}
