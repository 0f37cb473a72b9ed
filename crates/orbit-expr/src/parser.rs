//! Parser: builds a typed expression tree from lexer tokens
//!
//! Grammar:
//!
//! ```text
//! expr    := call | literal
//! call    := FUNCTION "(" [expr ("," expr)*] ")"
//! literal := LITERAL | QUOTED_LITERAL
//! ```
//!
//! Function names are resolved and arity-checked here so that a constraint
//! which parses is guaranteed to be well-formed at evaluation time.

use crate::errors::{ExprError, ExprResult};
use crate::lexer::{Lexer, Token, TokenKind};

/// Built-in functions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Property,
    Equal,
    And,
    Or,
    Not,
}

/// Accepted argument counts for a function
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Self::Exact(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{}", n),
            Self::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

impl Function {
    /// Resolve a function by name (without the leading `$`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "property" => Some(Self::Property),
            "equal" => Some(Self::Equal),
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "not" => Some(Self::Not),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Equal => "equal",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Self::Property | Self::Not => Arity::Exact(1),
            Self::Equal => Arity::Exact(2),
            Self::And | Self::Or => Arity::AtLeast(2),
        }
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.name())
    }
}

/// Expression tree node
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Call { function: Function, args: Vec<Expr> },
    Literal(String),
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(text) => {
                if text.is_empty() || text.chars().any(|c| !is_bare(c)) {
                    write!(f, "'{}'", text.replace('\'', "\\'"))
                } else {
                    write!(f, "{}", text)
                }
            }
            Self::Call { function, args } => {
                write!(f, "{}(", function)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

fn is_bare(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | ',' | '\'' | '"' | '$')
}

/// Deepest call nesting accepted; bounds recursion in parsing and evaluation
pub const MAX_DEPTH: usize = 64;

/// Recursive-descent parser over a token stream
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(input: &str) -> ExprResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self {
            tokens,
            pos: 0,
            depth: 0,
        })
    }

    /// Parse a single expression spanning the whole input
    pub fn parse(&mut self) -> ExprResult<Expr> {
        if self.check(TokenKind::Eof) {
            return Err(ExprError::EmptyExpression);
        }

        let expr = self.parse_expr()?;

        if !self.check(TokenKind::Eof) {
            let token = self.peek();
            return Err(ExprError::UnexpectedToken {
                col: token.col,
                expected: TokenKind::Eof.to_string(),
                found: token.text.clone(),
            });
        }

        Ok(expr)
    }

    fn parse_expr(&mut self) -> ExprResult<Expr> {
        let token = self.advance();
        match token.kind {
            TokenKind::Function => self.parse_call(token),
            TokenKind::Literal | TokenKind::QuotedLiteral => Ok(Expr::Literal(token.text)),
            TokenKind::Eof => Err(ExprError::UnexpectedEof("an expression".into())),
            _ => Err(ExprError::UnexpectedToken {
                col: token.col,
                expected: "an expression".into(),
                found: token.text,
            }),
        }
    }

    fn parse_call(&mut self, name: Token) -> ExprResult<Expr> {
        let function =
            Function::from_name(&name.text).ok_or(ExprError::UnknownFunction(name.text))?;

        self.expect(TokenKind::OpenParen)?;

        if self.depth == MAX_DEPTH {
            return Err(ExprError::NestingTooDeep { limit: MAX_DEPTH });
        }
        self.depth += 1;
        let args = self.parse_args();
        self.depth -= 1;
        let args = args?;

        let arity = function.arity();
        if !arity.accepts(args.len()) {
            return Err(ExprError::ArityMismatch {
                function: function.name().to_string(),
                expected: arity.to_string(),
                found: args.len(),
            });
        }

        Ok(Expr::Call { function, args })
    }

    fn parse_args(&mut self) -> ExprResult<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.check(TokenKind::CloseParen) {
            loop {
                args.push(self.parse_expr()?);
                if self.check(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        self.expect(TokenKind::CloseParen)?;
        Ok(args)
    }

    // ---- helpers ----

    fn peek(&self) -> &Token {
        // The lexer always terminates the stream with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> ExprResult<Token> {
        let token = self.advance();
        if token.kind == kind {
            return Ok(token);
        }
        if token.kind == TokenKind::Eof {
            return Err(ExprError::UnexpectedEof(kind.to_string()));
        }
        Err(ExprError::UnexpectedToken {
            col: token.col,
            expected: kind.to_string(),
            found: token.text,
        })
    }
}

/// Parse the body of an expression (without `${{ }}`)
pub fn parse_expr(input: &str) -> ExprResult<Expr> {
    Parser::new(input)?.parse()
}
