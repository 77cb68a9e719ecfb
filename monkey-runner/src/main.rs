mod repl;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use runner::RunnerError;

/// What gets printed for each input.
#[derive(Clone, Copy, ValueEnum)]
pub enum Emit {
    /// The evaluated value.
    Value,
    /// The parsed program in canonical form.
    Ast,
    /// The token stream.
    Tokens,
}

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, value_enum, default_value_t = Emit::Value)]
    emit: Emit,
    /// Source file to run. Starts a REPL when omitted.
    path: Option<PathBuf>,
}

// Logs go to stderr so that program output stays clean.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.path {
        None => repl::start(cli.emit),
        Some(path) => runner::execute_file(&path, cli.emit),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // Already shown by the printer.
        Err(RunnerError::Program(_)) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
