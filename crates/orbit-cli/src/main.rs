//! Orbit CLI - deployment planning from the terminal
//!
//! Loads solution, instance, target and device documents (JSON or YAML),
//! runs target matching and deployment planning, and prints the result.
//! Constraint expressions can be tried out with `orbit eval`.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod documents;
mod error;
mod output;

use commands::{eval, matching, plan, CommandContext};
use crate::config::{CliConfig, LoggingConfig};
use error::CliResult;
use orbit_providers::ProviderRegistry;

/// Orbit CLI application
#[derive(Parser)]
#[command(name = "orbit")]
#[command(about = "Orbit - deployment planning for multi-site workloads", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "ORBIT_CONFIG", global = true)]
    config: Option<String>,

    /// Output format (json, yaml); defaults to the configured format
    #[arg(short, long, global = true)]
    output: Option<output::OutputFormat>,

    /// Print constraint diagnostics on stderr
    #[arg(long, global = true)]
    show_diagnostics: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Plan an instance of a solution against a set of targets
    Plan(plan::PlanArgs),

    /// Plan a target's own components onto that target
    PlanTarget(plan::PlanTargetArgs),

    /// List the targets an instance selects
    Match(matching::MatchArgs),

    /// Evaluate a constraint expression
    Eval(eval::EvalArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    init_tracing(&config.logging, cli.verbose);

    let ctx = CommandContext {
        format: cli.output.unwrap_or(config.output.format),
        show_diagnostics: cli.show_diagnostics,
        registry: ProviderRegistry::with_defaults(),
        config,
    };

    match cli.command {
        Commands::Plan(args) => plan::execute(args, &ctx).await,
        Commands::PlanTarget(args) => plan::execute_target(args, &ctx).await,
        Commands::Match(args) => matching::execute(args, &ctx),
        Commands::Eval(args) => eval::execute(args),
    }
}

/// Logs go to stderr so stdout carries only the rendered document
fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
