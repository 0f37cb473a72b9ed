//! Expression evaluation command

use crate::documents::parse_key_value;
use crate::error::CliResult;
use clap::Args;
use orbit_expr::{evaluate_constraint, resolve, strip_delimiters};
use std::collections::BTreeMap;

/// Arguments for `orbit eval`
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Expression, with or without the surrounding `${{ }}`
    pub expression: String,

    /// Property available to `$property(...)`, as KEY=VALUE
    #[arg(short, long = "property", value_parser = parse_key_value)]
    pub properties: Vec<(String, String)>,

    /// Print the scalar result instead of requiring a boolean
    #[arg(long)]
    pub resolve: bool,
}

/// Evaluate the expression and print the result
pub fn execute(args: EvalArgs) -> CliResult<()> {
    let properties: BTreeMap<String, String> = args.properties.into_iter().collect();
    let expression = wrap(&args.expression);

    if args.resolve {
        println!("{}", resolve(&expression, &properties)?);
    } else {
        println!("{}", evaluate_constraint(&expression, &properties)?);
    }
    Ok(())
}

fn wrap(expression: &str) -> String {
    if strip_delimiters(expression).is_some() || expression.trim().is_empty() {
        expression.to_string()
    } else {
        format!("${{{{{}}}}}", expression.trim())
    }
}
