use std::fmt::Display;
use std::rc::Rc;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,
    Ident,
    Int,
    String,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,

    Equal,
    NotEqual,

    GreaterThan,
    LessThan,

    // Delimiters
    Comma,
    Colon,
    SemiColon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl TokenKind {
    /// Canonical name of the kind, as it appears in parser diagnostics.
    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Illegal => "ILLEGAL",
            Eof => "EOF",
            Ident => "IDENT",
            Int => "INT",
            String => "STRING",
            Assign => "=",
            Plus => "+",
            Minus => "-",
            Bang => "!",
            Asterisk => "*",
            Slash => "/",
            Equal => "==",
            NotEqual => "!=",
            GreaterThan => ">",
            LessThan => "<",
            Comma => ",",
            Colon => ":",
            SemiColon => ";",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Function => "FUNCTION",
            Let => "LET",
            True => "TRUE",
            False => "FALSE",
            If => "IF",
            Else => "ELSE",
            Return => "RETURN",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: Rc<str>,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<Rc<str>>, start: usize, end: usize) -> Self {
        Token {
            kind,
            literal: literal.into(),
            start,
            end,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.kind, self.literal)
    }
}

fn keywords(ident: &str) -> Option<TokenKind> {
    match ident {
        "fn" => Some(TokenKind::Function),
        "let" => Some(TokenKind::Let),
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "return" => Some(TokenKind::Return),
        _ => None,
    }
}

/// Pull-based scanner over a source string.
///
/// [`Lexer::next_token`] keeps returning an `EOF` token once the input is
/// exhausted. The `Iterator` implementation yields the same tokens but stops
/// before `EOF`.
#[derive(Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self { input, iter }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some((start, ch)) = self.iter.next() else {
            let end = self.input.len();
            return Token::new(TokenKind::Eof, "", end, end);
        };

        let kind = match ch {
            '=' => {
                if self.iter.next_if(|(_, ch)| *ch == '=').is_some() {
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.iter.next_if(|(_, ch)| *ch == '=').is_some() {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Bang
                }
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::SemiColon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '"' => return self.read_string(start),
            c if Lexer::is_letter(c) => return self.read_identifier(start),
            c if c.is_ascii_digit() => return self.read_number(start),
            _ => TokenKind::Illegal,
        };

        let end = self.next_idx();
        Token::new(kind, &self.input[start..end], start, end)
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn skip_whitespace(&mut self) {
        while self.iter.next_if(|(_, ch)| ch.is_whitespace()).is_some() {}
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| Self::is_letter(*ch)).is_some() {}

        let end = self.next_idx();
        let ident = &self.input[start..end];
        let kind = keywords(ident).unwrap_or(TokenKind::Ident);
        Token::new(kind, ident, start, end)
    }

    fn read_number(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| ch.is_ascii_digit()).is_some() {}

        let end = self.next_idx();
        Token::new(TokenKind::Int, &self.input[start..end], start, end)
    }

    /// `start` points at the opening quote. The literal excludes both quotes.
    fn read_string(&mut self, start: usize) -> Token {
        loop {
            match self.iter.next() {
                Some((idx, '"')) => {
                    return Token::new(TokenKind::String, &self.input[start + 1..idx], start, idx + 1)
                }
                Some(_) => {}
                None => {
                    // Unterminated: hand the whole tail to the parser as ILLEGAL.
                    let end = self.input.len();
                    return Token::new(TokenKind::Illegal, &self.input[start..end], start, end);
                }
            }
        }
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_literals(input: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(input)
            .map(|token| (token.kind, token.literal.to_string()))
            .collect()
    }

    #[test]
    fn test_delimiters() {
        let input = "=+(){},;";
        let mut lexer = Lexer::new(input);

        let expected = vec![
            (TokenKind::Assign, "="),
            (TokenKind::Plus, "+"),
            (TokenKind::LParen, "("),
            (TokenKind::RParen, ")"),
            (TokenKind::LBrace, "{"),
            (TokenKind::RBrace, "}"),
            (TokenKind::Comma, ","),
            (TokenKind::SemiColon, ";"),
            (TokenKind::Eof, ""),
        ];

        for (kind, literal) in expected {
            let token = lexer.next_token();
            assert_eq!(token.kind, kind);
            assert_eq!(token.literal.as_ref(), literal);
        }

        for _ in 0..3 {
            assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn test_spans() {
        let output = Lexer::new("let x").collect::<Vec<_>>();

        assert_eq!(
            output,
            vec![
                Token::new(TokenKind::Let, "let", 0, 3),
                Token::new(TokenKind::Ident, "x", 4, 5),
            ]
        );
    }

    #[test]
    fn test_program() {
        let input = "let five = 5;
    let ten = 10;
    let add = fn(x, y) {
    x + y;
    };
    let result = add(five, ten);
    ";
        let expected_output = vec![
            TokenKind::Let,
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Int,
            TokenKind::SemiColon,
            TokenKind::Let,
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Int,
            TokenKind::SemiColon,
            TokenKind::Let,
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Function,
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::Comma,
            TokenKind::Ident,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::Ident,
            TokenKind::Plus,
            TokenKind::Ident,
            TokenKind::SemiColon,
            TokenKind::RBrace,
            TokenKind::SemiColon,
            TokenKind::Let,
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Ident,
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::Comma,
            TokenKind::Ident,
            TokenKind::RParen,
            TokenKind::SemiColon,
        ];

        let output = Lexer::new(input)
            .map(|token| token.kind)
            .collect::<Vec<_>>();
        assert_eq!(output, expected_output);

        let literals = Lexer::new(input)
            .filter(|token| matches!(token.kind, TokenKind::Ident | TokenKind::Int))
            .map(|token| token.literal.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            literals,
            vec!["five", "5", "ten", "10", "add", "x", "y", "x", "y", "result", "add", "five", "ten"]
        );
    }

    #[test]
    fn test_operators() {
        let input = "
    !-/*5;
    5 < 10 > 5;
    10 == 10;
    10 != 9;
    ";

        let output = Lexer::new(input)
            .map(|token| token.kind)
            .collect::<Vec<_>>();

        let expected_output = vec![
            TokenKind::Bang,
            TokenKind::Minus,
            TokenKind::Slash,
            TokenKind::Asterisk,
            TokenKind::Int,
            TokenKind::SemiColon,
            TokenKind::Int,
            TokenKind::LessThan,
            TokenKind::Int,
            TokenKind::GreaterThan,
            TokenKind::Int,
            TokenKind::SemiColon,
            TokenKind::Int,
            TokenKind::Equal,
            TokenKind::Int,
            TokenKind::SemiColon,
            TokenKind::Int,
            TokenKind::NotEqual,
            TokenKind::Int,
            TokenKind::SemiColon,
        ];

        assert_eq!(output, expected_output)
    }

    #[test]
    fn test_keywords() {
        let input = "if (5 < 10) {
    return true;
    } else {
    return false;
    }";

        let output = Lexer::new(input)
            .map(|token| token.kind)
            .collect::<Vec<_>>();

        let expected_output = vec![
            TokenKind::If,
            TokenKind::LParen,
            TokenKind::Int,
            TokenKind::LessThan,
            TokenKind::Int,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::Return,
            TokenKind::True,
            TokenKind::SemiColon,
            TokenKind::RBrace,
            TokenKind::Else,
            TokenKind::LBrace,
            TokenKind::Return,
            TokenKind::False,
            TokenKind::SemiColon,
            TokenKind::RBrace,
        ];

        assert_eq!(output, expected_output)
    }

    #[test]
    fn test_strings_arrays_and_hashes() {
        let input = r#""foobar" "foo bar" [1, 2]; {"foo": "bar"}"#;

        assert_eq!(
            kinds_and_literals(input),
            vec![
                (TokenKind::String, "foobar".to_owned()),
                (TokenKind::String, "foo bar".to_owned()),
                (TokenKind::LBracket, "[".to_owned()),
                (TokenKind::Int, "1".to_owned()),
                (TokenKind::Comma, ",".to_owned()),
                (TokenKind::Int, "2".to_owned()),
                (TokenKind::RBracket, "]".to_owned()),
                (TokenKind::SemiColon, ";".to_owned()),
                (TokenKind::LBrace, "{".to_owned()),
                (TokenKind::String, "foo".to_owned()),
                (TokenKind::Colon, ":".to_owned()),
                (TokenKind::String, "bar".to_owned()),
                (TokenKind::RBrace, "}".to_owned()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_illegal() {
        let mut lexer = Lexer::new(r#"let s = "abc"#);
        let kinds = (0..4).map(|_| lexer.next_token()).collect::<Vec<_>>();

        assert_eq!(kinds[3].kind, TokenKind::Illegal);
        assert_eq!(kinds[3].literal.as_ref(), "\"abc");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_illegal_and_identifiers() {
        assert_eq!(
            kinds_and_literals("foo_bar @ x1"),
            vec![
                (TokenKind::Ident, "foo_bar".to_owned()),
                (TokenKind::Illegal, "@".to_owned()),
                (TokenKind::Ident, "x".to_owned()),
                (TokenKind::Int, "1".to_owned()),
            ]
        );
    }

    #[test]
    fn test_minus_is_not_part_of_literal() {
        assert_eq!(
            kinds_and_literals("-5"),
            vec![
                (TokenKind::Minus, "-".to_owned()),
                (TokenKind::Int, "5".to_owned()),
            ]
        );
    }
}
