//! Delimited expressions and placement constraints

use crate::errors::{ExprError, ExprResult};
use crate::eval::{PropertyLookup, Value};
use crate::parser::{parse_expr, Expr};
use tracing::trace;

const OPEN: &str = "${{";
const CLOSE: &str = "}}";

/// Body of a `${{ ... }}` wrapped expression, or `None` if `text` is not wrapped
pub fn strip_delimiters(text: &str) -> Option<&str> {
    text.trim().strip_prefix(OPEN)?.strip_suffix(CLOSE)
}

/// A parsed `${{ ... }}` expression
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    source: String,
    root: Expr,
}

impl Expression {
    /// Parse wrapped expression text
    pub fn parse(text: &str) -> ExprResult<Self> {
        let body =
            strip_delimiters(text).ok_or_else(|| ExprError::MalformedDelimiters(text.into()))?;
        Ok(Self {
            source: text.trim().to_string(),
            root: parse_expr(body)?,
        })
    }

    pub fn root(&self) -> &Expr {
        &self.root
    }

    /// Original text, trimmed
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn evaluate<C: PropertyLookup + ?Sized>(&self, ctx: &C) -> ExprResult<Value> {
        self.root.evaluate(ctx)
    }
}

/// Placement constraint attached to a component
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// No constraint text; eligible everywhere
    Always,
    Expr(Expression),
}

impl Constraint {
    /// Parse constraint text; blank text is [`Constraint::Always`]
    pub fn parse(text: &str) -> ExprResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::Always);
        }
        Expression::parse(text).map(Self::Expr)
    }

    /// Whether the constraint holds for `ctx`
    pub fn evaluate<C: PropertyLookup + ?Sized>(&self, ctx: &C) -> ExprResult<bool> {
        match self {
            Self::Always => Ok(true),
            Self::Expr(expr) => {
                let result = expr.evaluate(ctx)?.as_bool()?;
                trace!(constraint = %expr.source(), result, "Evaluated constraint");
                Ok(result)
            }
        }
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }
}

/// Parse and evaluate a constraint in one step
pub fn evaluate_constraint<C: PropertyLookup + ?Sized>(text: &str, ctx: &C) -> ExprResult<bool> {
    Constraint::parse(text)?.evaluate(ctx)
}

/// Substitute a wrapped expression with its scalar result.
///
/// Text that is not wrapped in `${{ }}` is returned unchanged.
pub fn resolve<C: PropertyLookup + ?Sized>(text: &str, ctx: &C) -> ExprResult<String> {
    if strip_delimiters(text).is_none() {
        return Ok(text.to_string());
    }
    Ok(Expression::parse(text)?.evaluate(ctx)?.into_string())
}
