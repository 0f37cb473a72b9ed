//! Evaluator: reduces an expression tree against a property context

use crate::errors::{ExprError, ExprResult};
use crate::parser::{Expr, Function};
use std::collections::{BTreeMap, HashMap};

/// Result of evaluating an expression
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Str(String),
}

impl Value {
    /// Interpret as a boolean; the strings `true` and `false` coerce
    pub fn as_bool(&self) -> ExprResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Str(s) if s == "true" => Ok(true),
            Self::Str(s) if s == "false" => Ok(false),
            Self::Str(s) => Err(ExprError::TypeMismatch {
                expected: "boolean".into(),
                found: s.clone(),
            }),
        }
    }

    /// String form used for equality and substitution
    pub fn into_string(self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Str(s) => s,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Read-only key/value context an expression is evaluated against
pub trait PropertyLookup {
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl PropertyLookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl PropertyLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<T: PropertyLookup + ?Sized> PropertyLookup for &T {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

/// Context with no properties
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyContext;

impl PropertyLookup for EmptyContext {
    fn lookup(&self, _key: &str) -> Option<&str> {
        None
    }
}

impl Expr {
    /// Evaluate against `ctx`
    pub fn evaluate<C: PropertyLookup + ?Sized>(&self, ctx: &C) -> ExprResult<Value> {
        match self {
            Self::Literal(text) => Ok(Value::Str(text.clone())),
            Self::Call { function, args } => call(*function, args, ctx),
        }
    }
}

fn call<C: PropertyLookup + ?Sized>(
    function: Function,
    args: &[Expr],
    ctx: &C,
) -> ExprResult<Value> {
    match function {
        Function::Property => {
            let key = arg(args, 0)?.evaluate(ctx)?.into_string();
            Ok(Value::Str(ctx.lookup(&key).unwrap_or_default().to_string()))
        }
        Function::Equal => {
            let left = arg(args, 0)?.evaluate(ctx)?.into_string();
            let right = arg(args, 1)?.evaluate(ctx)?.into_string();
            Ok(Value::Bool(left == right))
        }
        Function::And => {
            for expr in args {
                if !expr.evaluate(ctx)?.as_bool()? {
                    return Ok(Value::Bool(false));
                }
            }
            Ok(Value::Bool(true))
        }
        Function::Or => {
            for expr in args {
                if expr.evaluate(ctx)?.as_bool()? {
                    return Ok(Value::Bool(true));
                }
            }
            Ok(Value::Bool(false))
        }
        Function::Not => Ok(Value::Bool(!arg(args, 0)?.evaluate(ctx)?.as_bool()?)),
    }
}

// Arity is checked by the parser; a hand-built tree can still be short.
fn arg(args: &[Expr], index: usize) -> ExprResult<&Expr> {
    args.get(index)
        .ok_or_else(|| ExprError::UnexpectedEof(format!("argument {}", index + 1)))
}
