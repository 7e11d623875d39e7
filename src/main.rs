mod cli;
mod config;
mod error;
mod github;
mod shell;
mod workspace;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use cli::{output, Cli};
use error::GhCdError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_tracing(&cli.log_level);

    match cli::run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            output::error(&e.to_string());
            if let GhCdError::Usage(_) = e {
                eprintln!("{}", Cli::command().render_usage());
            }
            ExitCode::from(e.exit_code())
        }
    }
}
