//! HogTyped CLI
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.

mod commands;
mod error;
mod generator;
mod ops;
#[cfg(test)]
mod test_helpers;
mod utils;

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use commands::{completion, generate, init, validate, watch};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// HogTyped CLI - Generate type-safe PostHog wrappers from JSON Schema event definitions
#[derive(Parser)]
#[command(name = "hogtyped")]
#[command(
    about = "HogTyped CLI - Generate type-safe PostHog wrappers from JSON Schema event definitions",
    long_about = None
)]
#[command(version = env!("HOGTYPED_VERSION"))]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by `generate` and `watch`.
#[derive(Args, Debug, Clone)]
struct GenerateArgs {
    /// Schema file glob pattern (default: ./schemas/*.schema.json)
    #[arg(short, long)]
    schemas: Option<String>,
    /// Output file path (default: ./posthog_generated.py)
    #[arg(short, long)]
    output: Option<String>,
    /// Name of the generated wrapper class (default: PostHog)
    #[arg(short, long)]
    class_name: Option<String>,
    /// Default validation mode: strict, warning or disabled (default: warning)
    #[arg(short, long)]
    mode: Option<String>,
    /// Target language: python, typescript or json
    #[arg(short, long)]
    lang: Option<String>,
}

impl From<GenerateArgs> for generate::Options {
    fn from(args: GenerateArgs) -> Self {
        Self {
            schemas: args.schemas,
            output: args.output,
            class_name: args.class_name,
            mode: args.mode,
            lang: args.lang,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a typed wrapper from JSON Schema event definitions
    Generate(GenerateArgs),
    /// Scaffold an example schema directory
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Validate schema files and check that every reference resolves
    Validate {
        /// Schema file glob pattern (default: ./schemas/*.schema.json)
        #[arg(short, long)]
        schemas: Option<String>,
    },
    /// Regenerate the wrapper whenever a schema file changes
    Watch(GenerateArgs),
    /// Generate shell completion scripts
    Completion {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

/// The clap command tree, used for shell completion generation.
pub fn get_cli_command() -> clap::Command {
    Cli::command()
}

/// Install a stderr subscriber. `RUST_LOG` wins over the `-v` count.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,hogtyped=info,hogtyped_compiler=info".to_string(),
            2 => "info,hogtyped=debug,hogtyped_compiler=debug".to_string(),
            _ => "debug,hogtyped=trace,hogtyped_compiler=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Generate(args) => generate::run(&args.into()),
        Commands::Init { force } => init::run(&init::Options { force }),
        Commands::Validate { schemas } => validate::run(&validate::Options { schemas }),
        Commands::Watch(args) => watch::run(&watch::Options {
            generate: args.into(),
        }),
        Commands::Completion { shell } => completion::run(&completion::Options { shell }),
    };

    std::process::exit(exit_code);
}
