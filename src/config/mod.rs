pub mod persisted;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::GhCdError;

pub use persisted::PersistedLayer;

/// Transport used to build the clone URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Ssh,
    Https,
}

impl FromStr for Protocol {
    type Err = GhCdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ssh" => Ok(Protocol::Ssh),
            "https" => Ok(Protocol::Https),
            other => Err(GhCdError::Config(format!(
                "protocol must be https or ssh, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Ssh => write!(f, "ssh"),
            Protocol::Https => write!(f, "https"),
        }
    }
}

/// Order in which clone and create are tried when the workspace is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquireOrder {
    /// Clone, and only create the remote repository if that fails.
    #[default]
    CloneFirst,
    /// Always create the remote repository, then clone once.
    CreateFirst,
}

impl FromStr for AcquireOrder {
    type Err = GhCdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clone-first" => Ok(AcquireOrder::CloneFirst),
            "create-first" => Ok(AcquireOrder::CreateFirst),
            other => Err(GhCdError::Config(format!(
                "acquire-order must be clone-first or create-first, got '{}'",
                other
            ))),
        }
    }
}

/// Fully resolved settings for one run. Built by [`resolve`] and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub account: String,
    /// Empty means "open the workspace shell without cloning anything".
    pub repo: String,
    pub protocol: Protocol,
    pub base_dir: PathBuf,
    pub create_repo: bool,
    /// Empty means "use the caller's interactive shell".
    pub shell_command: Vec<String>,
    pub order: AcquireOrder,
}

/// Compiled-in defaults, anchored at the user's home directory.
#[derive(Debug, Clone)]
pub struct Defaults {
    pub home: PathBuf,
}

impl Defaults {
    pub fn from_env() -> Result<Self, GhCdError> {
        let home = dirs::home_dir()
            .ok_or_else(|| GhCdError::Config("could not determine home directory".into()))?;
        Ok(Self { home })
    }

    fn config(&self) -> Config {
        Config {
            account: String::new(),
            repo: String::new(),
            protocol: Protocol::Ssh,
            base_dir: self.home.join("repo"),
            create_repo: true,
            shell_command: Vec::new(),
            order: AcquireOrder::CloneFirst,
        }
    }
}

/// The `account`/`repo` pair taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub account: String,
    pub repo: String,
}

/// Parse positional arguments into a [`Target`].
///
/// Accepts `account`, `account/repo`, or `account repo`.
pub fn parse_target(args: &[String]) -> Result<Target, GhCdError> {
    match args {
        [single] => {
            let parts: Vec<&str> = single.split('/').collect();
            match parts.as_slice() {
                [account] => Ok(Target {
                    account: account.to_string(),
                    repo: String::new(),
                }),
                [account, repo] => Ok(Target {
                    account: account.to_string(),
                    repo: repo.to_string(),
                }),
                _ => Err(GhCdError::Usage(format!(
                    "could not parse '{}', too many separators",
                    single
                ))),
            }
        }
        [account, repo] => Ok(Target {
            account: account.clone(),
            repo: repo.clone(),
        }),
        _ => Err(GhCdError::Usage(format!(
            "expected 1 or 2 arguments, got {}",
            args.len()
        ))),
    }
}

/// Merge defaults, the persisted layer and the command line into a [`Config`].
///
/// `identity` is only called when no account was given on the command line
/// (e.g. `/proj`), and must return the authenticated login.
pub fn resolve<F>(
    defaults: &Defaults,
    persisted: &PersistedLayer,
    args: &[String],
    identity: F,
) -> Result<Config, GhCdError>
where
    F: FnOnce() -> anyhow::Result<String>,
{
    let target = parse_target(args)?;

    let mut config = defaults.config();
    apply_persisted(&mut config, persisted, &defaults.home)?;

    config.account = target.account;
    config.repo = target.repo;

    if config.account.is_empty() {
        let login = identity().map_err(|e| {
            GhCdError::Config(format!("could not determine GitHub account: {:#}", e))
        })?;
        let login = login.trim().to_string();
        if login.is_empty() {
            return Err(GhCdError::Config(
                "authenticated GitHub account has an empty login".into(),
            ));
        }
        debug!(account = %login, "defaulted account to authenticated user");
        config.account = login;
    }

    debug!(?config, "configuration resolved");
    Ok(config)
}

fn apply_persisted(
    config: &mut Config,
    persisted: &PersistedLayer,
    home: &Path,
) -> Result<(), GhCdError> {
    for (key, value) in persisted {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "basedir" => config.base_dir = expand_home(value, home),
            "protocol" => config.protocol = value.parse()?,
            "create-repo" => match persisted::parse_bool(value) {
                Some(b) => config.create_repo = b,
                None => warn!(value, "ignoring create-repo: not a boolean"),
            },
            "shell-cmd" => {
                config.shell_command = value.split_whitespace().map(String::from).collect();
            }
            "acquire-order" => config.order = value.parse()?,
            other => debug!(key = other, "ignoring unknown setting"),
        }
    }
    Ok(())
}

fn expand_home(value: &str, home: &Path) -> PathBuf {
    if value == "~" {
        home.to_path_buf()
    } else if let Some(rest) = value.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(value)
    }
}
