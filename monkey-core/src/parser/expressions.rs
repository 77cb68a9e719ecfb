use std::rc::Rc;

use super::error::ParseError;
use super::statements::parse_statement;
use crate::ast::{BlockStatement, Expression, FunctionLiteral, Identifier};
use crate::lexer::TokenKind;
use crate::parser::Parser;

#[derive(PartialOrd, PartialEq, Debug, Clone, Copy)]
pub enum Precedence {
    Lowest = 0,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

pub fn precedence_of(token: &TokenKind) -> Precedence {
    match token {
        TokenKind::Equal => Precedence::Equals,
        TokenKind::NotEqual => Precedence::Equals,
        TokenKind::LessThan => Precedence::LessGreater,
        TokenKind::GreaterThan => Precedence::LessGreater,
        TokenKind::Plus => Precedence::Sum,
        TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk => Precedence::Product,
        TokenKind::Slash => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

pub fn parse_expression(
    parser: &mut Parser,
    precedence: Precedence,
) -> Result<Expression, ParseError> {
    let mut left_expression = prefix_parsing(parser)?;

    while !parser.peek_is(TokenKind::SemiColon) && precedence < precedence_of(&parser.peek.kind) {
        let Some(infix_parse_function) = infix_parsing_function(parser.peek.kind) else {
            break;
        };
        parser.next_token();
        left_expression = infix_parse_function(left_expression, parser)?;
    }

    Ok(left_expression)
}

fn prefix_operation(
    kind: crate::ast::PrefixOperationKind,
) -> impl FnOnce(&mut Parser) -> Result<Expression, ParseError> {
    move |parser| {
        parser.next_token();
        Ok(Expression::PrefixOperation(
            kind,
            Box::new(parse_expression(parser, Precedence::Prefix)?),
        ))
    }
}

fn parse_integer_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let literal = parser.current.literal.clone();
    match literal.parse() {
        Ok(value) => Ok(Expression::IntegerLiteral(value)),
        Err(source) => Err(ParseError::InvalidInteger { literal, source }),
    }
}

fn parse_grouped_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.next_token();
    let expression = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_peek(TokenKind::RParen)?;

    Ok(expression)
}

/// Parses a comma separated list. `current` must be the opening delimiter;
/// on success `current` is the `terminator`. A trailing comma is accepted.
fn parse_sequence<T>(
    parser: &mut Parser,
    parse_element: impl Fn(&mut Parser) -> Result<T, ParseError>,
    terminator: TokenKind,
) -> Result<Vec<T>, ParseError> {
    let mut elements = Vec::new();

    if parser.peek_is(terminator) {
        parser.next_token();
        return Ok(elements);
    }

    parser.next_token();
    elements.push(parse_element(parser)?);

    while parser.peek_is(TokenKind::Comma) {
        parser.next_token();
        if parser.peek_is(terminator) {
            break;
        }
        parser.next_token();
        elements.push(parse_element(parser)?);
    }

    parser.expect_peek(terminator)?;
    Ok(elements)
}

fn parse_array_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let expressions = parse_sequence(
        parser,
        |parser| parse_expression(parser, Precedence::Lowest),
        TokenKind::RBracket,
    )?;
    Ok(Expression::ArrayLiteral(expressions))
}

fn parse_hash_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let pairs = parse_sequence(
        parser,
        |parser| {
            let key = parse_expression(parser, Precedence::Lowest)?;
            parser.expect_peek(TokenKind::Colon)?;
            parser.next_token();
            let value = parse_expression(parser, Precedence::Lowest)?;
            Ok((key, value))
        },
        TokenKind::RBrace,
    )?;
    Ok(Expression::HashLiteral(pairs))
}

fn parse_if_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.next_token();
    let condition = Box::new(parse_expression(parser, Precedence::Lowest)?);

    parser.expect_peek(TokenKind::LBrace)?;
    let consequence = parse_block_statement(parser)?;

    let alternative = if parser.peek_is(TokenKind::Else) {
        parser.next_token();
        parser.expect_peek(TokenKind::LBrace)?;
        Some(parse_block_statement(parser)?)
    } else {
        None
    };

    Ok(Expression::IfExpression {
        condition,
        consequence,
        alternative,
    })
}

/// `current` must be `{`; leaves `current` on the matching `}`.
fn parse_block_statement(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    let mut statements = Vec::new();
    parser.next_token();

    while !parser.current_is(TokenKind::RBrace) {
        if parser.current_is(TokenKind::Eof) {
            return Err(ParseError::unexpected_token(
                TokenKind::RBrace,
                &parser.current,
            ));
        }
        statements.push(parse_statement(parser)?);
        parser.next_token();
    }

    Ok(BlockStatement { statements })
}

fn parse_function_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.expect_peek(TokenKind::LParen)?;
    let parameters = parse_parameters(parser)?;

    parser.expect_peek(TokenKind::LBrace)?;
    let body = parse_block_statement(parser)?;

    Ok(Expression::FunctionLiteral(Rc::new(FunctionLiteral {
        parameters,
        body,
    })))
}

fn parse_parameters(parser: &mut Parser) -> Result<Vec<Identifier>, ParseError> {
    parse_sequence(parser, |parser| parser.parse_ident(), TokenKind::RParen)
}

pub fn prefix_parsing(parser: &mut Parser) -> Result<Expression, ParseError> {
    match parser.current.kind {
        TokenKind::Ident => Ok(Expression::Identifier(Identifier {
            name: parser.current.literal.clone(),
        })),
        TokenKind::Int => parse_integer_literal(parser),
        TokenKind::String => Ok(Expression::StringLiteral(
            parser.current.literal.to_string(),
        )),
        TokenKind::True => Ok(Expression::BooleanLiteral(true)),
        TokenKind::False => Ok(Expression::BooleanLiteral(false)),
        TokenKind::Bang => prefix_operation(crate::ast::PrefixOperationKind::Bang)(parser),
        TokenKind::Minus => prefix_operation(crate::ast::PrefixOperationKind::Minus)(parser),
        TokenKind::LParen => parse_grouped_expression(parser),
        TokenKind::LBracket => parse_array_literal(parser),
        TokenKind::LBrace => parse_hash_literal(parser),
        TokenKind::If => parse_if_expression(parser),
        TokenKind::Function => parse_function_literal(parser),
        _ => Err(ParseError::NoPrefixParseFunction(parser.current.clone())),
    }
}

type InfixFunction = Box<dyn FnOnce(Expression, &mut Parser) -> Result<Expression, ParseError>>;

fn infix_operation(token: TokenKind, kind: crate::ast::InfixOperationKind) -> InfixFunction {
    Box::new(
        move |left: Expression, parser: &mut Parser| -> Result<Expression, ParseError> {
            let new_precedence = precedence_of(&token);
            parser.next_token();

            Ok(Expression::InfixOperation(
                kind,
                Box::new(left),
                Box::new(parse_expression(parser, new_precedence)?),
            ))
        },
    )
}

fn parse_call_function(left: Expression, parser: &mut Parser) -> Result<Expression, ParseError> {
    let arguments = parse_sequence(
        parser,
        |parser| parse_expression(parser, Precedence::Lowest),
        TokenKind::RParen,
    )?;

    Ok(Expression::CallExpression {
        function: Box::new(left),
        arguments,
    })
}

fn parse_index_expression(left: Expression, parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.next_token();
    let index = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_peek(TokenKind::RBracket)?;

    Ok(Expression::IndexExpression {
        left: Box::new(left),
        index: Box::new(index),
    })
}

/// Infix rule for a token kind, entered with `current` on the operator.
pub fn infix_parsing_function(token: TokenKind) -> Option<InfixFunction> {
    use crate::ast::InfixOperationKind as InfixKind;

    match token {
        TokenKind::Plus => Some(infix_operation(TokenKind::Plus, InfixKind::Plus)),
        TokenKind::Minus => Some(infix_operation(TokenKind::Minus, InfixKind::Minus)),
        TokenKind::LessThan => Some(infix_operation(TokenKind::LessThan, InfixKind::LessThan)),
        TokenKind::GreaterThan => Some(infix_operation(
            TokenKind::GreaterThan,
            InfixKind::GreaterThan,
        )),
        TokenKind::Equal => Some(infix_operation(TokenKind::Equal, InfixKind::Equal)),
        TokenKind::NotEqual => Some(infix_operation(TokenKind::NotEqual, InfixKind::NotEqual)),
        TokenKind::Asterisk => Some(infix_operation(TokenKind::Asterisk, InfixKind::Multiply)),
        TokenKind::Slash => Some(infix_operation(TokenKind::Slash, InfixKind::Divide)),
        TokenKind::LParen => Some(Box::new(parse_call_function)),
        TokenKind::LBracket => Some(Box::new(parse_index_expression)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(Precedence::Lowest < Precedence::Equals);
        assert!(Precedence::Equals < Precedence::LessGreater);
        assert!(Precedence::LessGreater < Precedence::Sum);
        assert!(Precedence::Sum < Precedence::Product);
        assert!(Precedence::Product < Precedence::Prefix);
        assert!(Precedence::Prefix < Precedence::Call);
        assert!(Precedence::Call < Precedence::Index);
    }

    #[test]
    fn test_only_operators_have_infix_rules() {
        for kind in [TokenKind::Plus, TokenKind::Equal, TokenKind::LParen, TokenKind::LBracket] {
            assert!(infix_parsing_function(kind).is_some(), "{kind}");
        }
        for kind in [TokenKind::Bang, TokenKind::Ident, TokenKind::LBrace, TokenKind::SemiColon] {
            assert!(infix_parsing_function(kind).is_none(), "{kind}");
        }
    }
}
