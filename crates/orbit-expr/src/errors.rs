//! Expression error types

/// Errors raised while parsing or evaluating a constraint expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExprError {
    #[error("Malformed delimiters: expected '${{{{ ... }}}}' around '{0}'")]
    MalformedDelimiters(String),

    #[error("Empty expression")]
    EmptyExpression,

    #[error("Parse error at column {col}: {message}")]
    ParseError { col: usize, message: String },

    #[error("Unexpected token at column {col}: expected {expected}, found '{found}'")]
    UnexpectedToken {
        col: usize,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of expression: expected {0}")]
    UnexpectedEof(String),

    #[error("Unknown function: '${0}'")]
    UnknownFunction(String),

    #[error("Function '${function}' expects {expected} argument(s), found {found}")]
    ArityMismatch {
        function: String,
        expected: String,
        found: usize,
    },

    #[error("Expression nested deeper than {limit} calls")]
    NestingTooDeep { limit: usize },

    #[error("Type mismatch: expected {expected}, found '{found}'")]
    TypeMismatch { expected: String, found: String },
}

impl ExprError {
    /// True for errors raised before evaluation started
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, Self::TypeMismatch { .. })
    }
}

/// Result type alias for expression operations
pub type ExprResult<T> = Result<T, ExprError>;
