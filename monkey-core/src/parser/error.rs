use std::num::ParseIntError;
use std::rc::Rc;

use thiserror::Error;

use crate::lexer::{Token, TokenKind};

/// Non-fatal parse diagnostic. The `Display` output is the message shown to
/// the user.
#[derive(Debug, PartialEq, Clone, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {} instead", .got.kind)]
    UnexpectedToken { expected: TokenKind, got: Token },
    #[error("no prefix parse function for {} found", .0.kind)]
    NoPrefixParseFunction(Token),
    #[error("could not parse {literal} as integer")]
    InvalidInteger {
        literal: Rc<str>,
        #[source]
        source: ParseIntError,
    },
}

impl ParseError {
    pub fn unexpected_token(expected: TokenKind, got: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            got: got.clone(),
        }
    }

    /// The token the diagnostic points at, when there is one.
    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseError::UnexpectedToken { got, .. } => Some(got),
            ParseError::NoPrefixParseFunction(token) => Some(token),
            ParseError::InvalidInteger { .. } => None,
        }
    }
}
