//! Lexer: tokenizes the body of a `${{ ... }}` expression
//!
//! Produces function names (`$equal`), parentheses, commas, bare literals
//! and quoted literals. Whitespace separates tokens and is otherwise ignored.

use crate::errors::{ExprError, ExprResult};

/// A token produced by the lexer
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Token text; function names without the leading `$`, quoted
    /// literals without their quotes
    pub text: String,
    /// Column number (1-based)
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, col: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            col,
        }
    }
}

/// Token types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Function,
    Literal,
    QuotedLiteral,
    OpenParen,
    CloseParen,
    Comma,
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Literal => write!(f, "literal"),
            Self::QuotedLiteral => write!(f, "quoted literal"),
            Self::OpenParen => write!(f, "'('"),
            Self::CloseParen => write!(f, "')'"),
            Self::Comma => write!(f, "','"),
            Self::Eof => write!(f, "end of expression"),
        }
    }
}

/// Lexer for constraint expressions
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> ExprResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.pos >= self.input.len() {
                tokens.push(Token::new(TokenKind::Eof, "", self.col()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> ExprResult<Token> {
        let ch = self.input[self.pos];
        let col = self.col();

        match ch {
            '(' => {
                self.pos += 1;
                Ok(Token::new(TokenKind::OpenParen, "(", col))
            }
            ')' => {
                self.pos += 1;
                Ok(Token::new(TokenKind::CloseParen, ")", col))
            }
            ',' => {
                self.pos += 1;
                Ok(Token::new(TokenKind::Comma, ",", col))
            }
            '\'' | '"' => self.read_quoted(ch),
            '$' if self.peek_at(1).is_some_and(is_ident_start) => self.read_function(),
            '$' => Err(ExprError::ParseError {
                col,
                message: "'$' must be followed by a function name".into(),
            }),
            _ => Ok(self.read_literal()),
        }
    }

    fn read_function(&mut self) -> ExprResult<Token> {
        let col = self.col();
        self.pos += 1; // skip '$'

        let mut name = String::new();
        while let Some(c) = self.peek_at(0).filter(|c| is_ident_char(*c)) {
            name.push(c);
            self.pos += 1;
        }

        Ok(Token::new(TokenKind::Function, name, col))
    }

    fn read_quoted(&mut self, quote: char) -> ExprResult<Token> {
        let col = self.col();
        self.pos += 1; // skip opening quote

        let mut text = String::new();
        loop {
            match self.peek_at(0) {
                None => {
                    return Err(ExprError::ParseError {
                        col,
                        message: "Unterminated quoted literal".into(),
                    })
                }
                Some('\\') if self.peek_at(1) == Some(quote) => {
                    text.push(quote);
                    self.pos += 2;
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    break;
                }
                Some(c) => {
                    text.push(c);
                    self.pos += 1;
                }
            }
        }

        Ok(Token::new(TokenKind::QuotedLiteral, text, col))
    }

    fn read_literal(&mut self) -> Token {
        let col = self.col();
        let mut text = String::new();

        while let Some(c) = self.peek_at(0).filter(|c| is_literal_char(*c)) {
            text.push(c);
            self.pos += 1;
        }

        Token::new(TokenKind::Literal, text, col)
    }

    fn skip_whitespace(&mut self) {
        while self.peek_at(0).is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn col(&self) -> usize {
        self.pos + 1
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_literal_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | ',' | '\'' | '"')
}
