pub mod error;
pub mod expressions;
pub mod statements;

use crate::ast::{Identifier, Program};
use crate::lexer::{Lexer, Token, TokenKind};
pub use error::ParseError;
use statements::parse_statement;

/// Pratt parser holding two tokens of lookahead.
///
/// Parse functions are entered with `current` on the first token of the
/// construct they parse and leave `current` on its last token.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    pub(crate) current: Token,
    pub(crate) peek: Token,
    // Braces opened and not yet closed, up to and including `current`.
    depth: usize,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        let mut parser = Self {
            lexer,
            current,
            peek,
            depth: 0,
            errors: Vec::new(),
        };
        parser.track_depth();
        parser
    }

    pub(crate) fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
        self.track_depth();
    }

    fn track_depth(&mut self) {
        match self.current.kind {
            TokenKind::LBrace => self.depth += 1,
            TokenKind::RBrace => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
    }

    pub(crate) fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(crate) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advances only when the peek token has the expected kind.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::unexpected_token(kind, &self.peek))
        }
    }

    pub(crate) fn parse_ident(&mut self) -> Result<Identifier, ParseError> {
        if self.current_is(TokenKind::Ident) {
            Ok(Identifier {
                name: self.current.literal.clone(),
            })
        } else {
            Err(ParseError::unexpected_token(TokenKind::Ident, &self.current))
        }
    }

    /// Parses statements until `EOF`. The program is returned even when
    /// diagnostics were recorded; check [`Parser::errors`] before using it.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.current_is(TokenKind::Eof) {
            match parse_statement(self) {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    self.errors.push(err);
                    self.synchronize();
                }
            }
            self.next_token();
        }

        tracing::debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        Program { statements }
    }

    // Skip the rest of a broken statement, including any blocks it opened, so
    // parsing resumes after the next top-level `;`.
    fn synchronize(&mut self) {
        while !(self.current_is(TokenKind::SemiColon) && self.depth == 0)
            && !self.current_is(TokenKind::Eof)
        {
            self.next_token();
        }
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }
}
