use crate::ast::{LetStatement, ReturnStatement, Statement};
use crate::lexer::TokenKind;
use crate::parser::expressions::{parse_expression, Precedence};
use crate::parser::{ParseError, Parser};

pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    match parser.current.kind {
        TokenKind::Let => Ok(Statement::Let(parse_let_statement(parser)?)),
        TokenKind::Return => Ok(Statement::Return(parse_return_statement(parser)?)),
        _ => Ok(Statement::Expression(parse_expression_statement(parser)?)),
    }
}

fn skip_optional_semicolon(parser: &mut Parser) {
    if parser.peek_is(TokenKind::SemiColon) {
        parser.next_token();
    }
}

fn parse_let_statement(parser: &mut Parser) -> Result<LetStatement, ParseError> {
    parser.expect_peek(TokenKind::Ident)?;
    let identifier = parser.parse_ident()?;
    parser.expect_peek(TokenKind::Assign)?;
    parser.next_token();
    let value = parse_expression(parser, Precedence::Lowest)?;
    skip_optional_semicolon(parser);

    Ok(LetStatement { identifier, value })
}

fn parse_return_statement(parser: &mut Parser) -> Result<ReturnStatement, ParseError> {
    parser.next_token();
    let value = parse_expression(parser, Precedence::Lowest)?;
    skip_optional_semicolon(parser);

    Ok(ReturnStatement { value })
}

fn parse_expression_statement(
    parser: &mut Parser,
) -> Result<crate::ast::Expression, ParseError> {
    let expression = parse_expression(parser, Precedence::Lowest)?;
    skip_optional_semicolon(parser);

    Ok(expression)
}
