use std::rc::Rc;

use monkey_core::ast::Program;
use monkey_core::lexer::Token;
use monkey_core::parser::ParseError;
use monkey_interpreter::object::Object;

use super::evaluator::Failure;

pub trait Printer {
    type Object;

    fn print(&mut self, object: Self::Object);
}

/// Prints nothing for inputs that only bind a name.
pub struct ValuePrinter;

impl Printer for ValuePrinter {
    type Object = Option<Rc<Object>>;

    fn print(&mut self, object: Self::Object) {
        if let Some(object) = object {
            println!("{}", object);
        }
    }
}

pub struct AstPrinter;

impl Printer for AstPrinter {
    type Object = Program;

    fn print(&mut self, program: Self::Object) {
        println!("{}", program);
    }
}

pub struct TokenPrinter;

impl Printer for TokenPrinter {
    type Object = Vec<Token>;

    fn print(&mut self, tokens: Self::Object) {
        for token in tokens {
            println!("{}", token);
        }
    }
}

pub fn print_failure(failure: &Failure) {
    match failure {
        Failure::Parse(errors) => print_parser_errors(errors),
        Failure::Evaluation(error) => println!("ERROR: {}", error),
    }
}

const MONKEY_FACE: &str = r#"           __,__
  .--.  .-"     "-.  .--.
 / .. \/  .-. .-.  \/ .. \
| |  '|  /   Y   \  | ' | |
| \   \  \ 0 | 0 /  /   / |
 \ '- ,\.-"""""""-./, -' /
  ''-' /_   ^ ^   _\ '-''
       | \._   _./ |
       \  \ '~' /  /
       '._ '-=-' _.'
          '-----'
"#;

fn print_parser_errors(errors: &[ParseError]) {
    print!("{}", MONKEY_FACE);
    println!("Woops! We ran into some monkey business here!");
    println!(" parser errors:");
    for error in errors {
        println!("\t{}", describe(error));
    }
}

fn describe(error: &ParseError) -> String {
    match error.token() {
        Some(token) => format!("{} (at {}..{})", error, token.start, token.end),
        None => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::describe;

    #[test]
    fn test_diagnostics_carry_spans() {
        let (_, errors) = monkey_core::parse("let x = 1;\nlet = 2;");
        let described = errors.iter().map(describe).collect::<Vec<_>>();
        assert_eq!(
            described,
            vec!["expected next token to be IDENT, got = instead (at 15..16)"]
        );

        let (_, errors) = monkey_core::parse("99999999999999999999");
        assert_eq!(
            describe(&errors[0]),
            "could not parse 99999999999999999999 as integer"
        );
    }
}
