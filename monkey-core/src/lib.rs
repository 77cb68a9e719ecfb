pub mod ast;
pub mod lexer;
pub mod parser;

/// Lexes and parses `source` in one go.
///
/// The program is returned even when parsing failed; it must not be
/// evaluated unless the diagnostics are empty.
pub fn parse(source: &str) -> (ast::Program, Vec<parser::ParseError>) {
    let mut parser = parser::Parser::new(lexer::Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.into_errors())
}
