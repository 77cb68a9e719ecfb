use std::rc::Rc;

use monkey_core::ast::{Program, Statement};
use monkey_core::lexer::{Lexer, Token};
use monkey_core::parser::ParseError;
use monkey_interpreter::environment::Environment;
use monkey_interpreter::evaluator;
use monkey_interpreter::object::{EvaluationError, Object};
use thiserror::Error;

/// Why an input produced no output.
#[derive(Debug, Error)]
pub enum Failure {
    #[error("parsing failed with {} errors", .0.len())]
    Parse(Vec<ParseError>),
    #[error(transparent)]
    Evaluation(EvaluationError),
}

/// Turns one chunk of source into something a printer can show.
pub trait Evaluator {
    type Object;

    fn evaluate(&mut self, source: &str) -> Result<Self::Object, Failure>;
}

fn parse(source: &str) -> Result<Program, Failure> {
    let (program, errors) = monkey_core::parse(source);
    if !errors.is_empty() {
        return Err(Failure::Parse(errors));
    }
    Ok(program)
}

/// Evaluates every input in one environment, so bindings carry over.
///
/// An input ending in a `let` that evaluates to `null` yields no value.
pub struct InterpreterEvaluator {
    environment: Environment,
}

impl InterpreterEvaluator {
    pub fn new() -> Self {
        Self {
            environment: Environment::new(),
        }
    }
}

impl Evaluator for InterpreterEvaluator {
    type Object = Option<Rc<Object>>;

    fn evaluate(&mut self, source: &str) -> Result<Self::Object, Failure> {
        let program = parse(source)?;
        let object = evaluator::eval_program(&program, &self.environment);
        let binds_only = matches!(program.statements.last(), Some(Statement::Let(_)));
        match object.as_ref() {
            Object::Error(error) => Err(Failure::Evaluation(error.clone())),
            Object::Null if binds_only => Ok(None),
            _ => Ok(Some(object)),
        }
    }
}

pub struct AstEvaluator;

impl Evaluator for AstEvaluator {
    type Object = Program;

    fn evaluate(&mut self, source: &str) -> Result<Self::Object, Failure> {
        parse(source)
    }
}

pub struct TokenEvaluator;

impl Evaluator for TokenEvaluator {
    type Object = Vec<Token>;

    fn evaluate(&mut self, source: &str) -> Result<Self::Object, Failure> {
        Ok(Lexer::new(source).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monkey_core::lexer::TokenKind;

    #[test]
    fn test_bindings_persist() {
        let mut evaluator = InterpreterEvaluator::new();
        assert_eq!(evaluator.evaluate("let x = 5;").unwrap(), None);
        assert_eq!(
            evaluator.evaluate("x * 2").unwrap(),
            Some(Object::integer(10))
        );
        assert_eq!(
            evaluator.evaluate("let y = x; y").unwrap(),
            Some(Object::integer(5))
        );
        assert_eq!(
            evaluator.evaluate("if (false) { 1 }").unwrap(),
            Some(Object::null())
        );
        // a top-level return still produces its value
        assert_eq!(
            evaluator.evaluate("return 7; let z = 1;").unwrap(),
            Some(Object::integer(7))
        );
    }

    #[test]
    fn test_failures() {
        let mut evaluator = InterpreterEvaluator::new();

        match evaluator.evaluate("let = 5;") {
            Err(Failure::Parse(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected parse errors, got {other:?}"),
        }
        match evaluator.evaluate("5 + true") {
            Err(Failure::Evaluation(error)) => {
                assert_eq!(error.to_string(), "type mismatch: INTEGER + BOOLEAN")
            }
            other => panic!("expected an evaluation error, got {other:?}"),
        }
        // a failed input does not poison the session
        assert_eq!(evaluator.evaluate("1 + 1").unwrap(), Some(Object::integer(2)));
    }

    #[test]
    fn test_ast_and_tokens() {
        assert_eq!(
            AstEvaluator.evaluate("-a * b").unwrap().to_string(),
            "((-a) * b)"
        );
        let kinds = TokenEvaluator
            .evaluate("let x = 1;")
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Let,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Int,
                TokenKind::SemiColon
            ]
        );
    }
}
