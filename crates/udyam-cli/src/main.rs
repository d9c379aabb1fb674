//! # udyam CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

use udyam_cli::register::{run_register, RegisterArgs};
use udyam_cli::validate::{run_validate, ValidateArgs};

/// Udyam registration from the terminal.
///
/// Walks through identity (OTP) and tax identifier verification, or checks
/// single field values against the form's rules.
#[derive(Parser, Debug)]
#[command(name = "udyam", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fill in and verify a registration interactively.
    Register(RegisterArgs),
    /// Check one value against a field rule.
    Validate(ValidateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so they never interleave with the screens on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Register(args) => {
            let summary = run_register(&args).await?;
            tracing::info!(
                completed = summary.completed,
                step = %summary.final_step,
                "session ended"
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate(args) => {
            if run_validate(&args)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(1))
            }
        }
    }
}
