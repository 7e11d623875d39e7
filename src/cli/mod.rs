pub mod output;
pub mod prompt;

use clap::Parser;
use tracing::debug;

use crate::config::{self, persisted, Defaults};
use crate::error::GhCdError;
use crate::github::{GhCli, RemoteRepositoryService};
use crate::shell;
use crate::workspace::{
    self,
    acquire::{Acquisition, RepositoryAcquirer},
};

/// Open a shell in a GitHub repository workspace, cloning or creating it first
#[derive(Parser)]
#[command(name = "gh-cd", version, about, long_about = None)]
pub struct Cli {
    /// `account`, `account/repo`, or `account repo`
    #[arg(value_name = "ACCOUNT[/REPO]", allow_hyphen_values = true)]
    pub target: Vec<String>,

    /// Logging verbosity for stderr: off, error, warn, info, debug.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Initialise stderr logging. `RUST_LOG` wins over `--log-level`.
pub fn init_tracing(log_level: &str) {
    let filter = match log_level {
        "off" | "error" | "warn" | "info" | "debug" => log_level,
        other => {
            output::warning(&format!(
                "unknown log level '{}', defaulting to 'warn'",
                other
            ));
            "warn"
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// Resolve, acquire, launch. Returns the shell's exit code.
pub fn run(cli: Cli) -> Result<u8, GhCdError> {
    let defaults = Defaults::from_env()?;
    let persisted = persisted::load(&persisted::default_path(&defaults.home));

    let gh = GhCli::default();
    let config = config::resolve(&defaults, &persisted, &cli.target, || {
        gh.authenticated_user()
    })?;

    let acquisition = RepositoryAcquirer::new(&gh, &prompt::StdinConfirm).acquire(&config)?;
    debug!(?acquisition, "workspace ready");
    match &acquisition {
        Acquisition::NoRepository => output::info("Running shell"),
        Acquisition::AlreadyPresent(path)
        | Acquisition::Cloned(path)
        | Acquisition::ClonedAfterCreate(path) => {
            output::info(&format!("Running shell in {}", path.display()))
        }
    }

    let status = shell::launch(&config, &workspace::working_dir(&config))?;
    debug!(%status, "shell exited");
    Ok(shell::exit_code(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_target() {
        let cli = Cli::try_parse_from(["gh-cd", "alice", "proj"]).unwrap();
        assert_eq!(cli.target, vec!["alice", "proj"]);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn parses_log_level() {
        let cli = Cli::try_parse_from(["gh-cd", "--log-level", "debug", "alice/proj"]).unwrap();
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.target, vec!["alice/proj"]);
    }

    #[test]
    fn repo_starting_with_hyphen_is_positional() {
        let cli = Cli::try_parse_from(["gh-cd", "alice", "-scratch"]).unwrap();
        assert_eq!(cli.target, vec!["alice", "-scratch"]);
    }

    #[test]
    fn clap_accepts_any_count_and_leaves_validation_to_us() {
        let cli = Cli::try_parse_from(["gh-cd"]).unwrap();
        assert!(cli.target.is_empty());
        assert!(matches!(
            config::parse_target(&cli.target),
            Err(GhCdError::Usage(_))
        ));
    }
}
