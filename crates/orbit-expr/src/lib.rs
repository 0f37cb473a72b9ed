//! Placement constraint expressions for Orbit
//!
//! Components carry an optional constraint that decides which targets they
//! may land on. Constraints are written in a small functional language
//! wrapped in `${{ ... }}` and evaluated against a target's properties.
//!
//! # Syntax
//!
//! ```text
//! ${{ $and($equal($property(OS), linux), $not($equal($property(tier), edge))) }}
//! ```
//!
//! | Function            | Arguments | Result                                 |
//! |---------------------|-----------|----------------------------------------|
//! | `$property(key)`    | 1         | property value, empty if absent        |
//! | `$equal(a, b)`      | 2         | case-sensitive string equality          |
//! | `$and(a, b, ...)`   | 2 or more | boolean, short-circuits left to right  |
//! | `$or(a, b, ...)`    | 2 or more | boolean, short-circuits left to right  |
//! | `$not(a)`           | 1         | boolean negation                       |
//!
//! Literals are bare words or quoted with `'` / `"`. The strings `true` and
//! `false` are accepted wherever a boolean is required.
//!
//! # Usage
//!
//! ```rust
//! use orbit_expr::{evaluate_constraint, Constraint};
//! use std::collections::BTreeMap;
//!
//! let mut properties = BTreeMap::new();
//! properties.insert("OS".to_string(), "windows".to_string());
//!
//! let constraint = Constraint::parse("${{$equal($property(OS),windows)}}").unwrap();
//! assert!(constraint.evaluate(&properties).unwrap());
//!
//! // An empty constraint always holds
//! assert!(evaluate_constraint("", &properties).unwrap());
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

mod constraint;
mod errors;
mod eval;
mod lexer;
mod parser;

pub use constraint::{evaluate_constraint, resolve, strip_delimiters, Constraint, Expression};
pub use errors::{ExprError, ExprResult};
pub use eval::{EmptyContext, PropertyLookup, Value};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse_expr, Arity, Expr, Function, Parser, MAX_DEPTH};
