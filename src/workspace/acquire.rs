//! Making sure the local checkout exists.
//!
//! The workflow clones first and, when that fails, creates the remote
//! repository (after asking, unless `create-repo` is set) and clones once
//! more. With [`AcquireOrder::CreateFirst`] the repository is created up
//! front and cloned once.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cli::output;
use crate::config::{AcquireOrder, Config};
use crate::error::GhCdError;
use crate::github::RemoteRepositoryService;

use super::{clone_url, local_path, qualified_name};

/// Yes/no confirmation from the user.
pub trait Confirm {
    fn confirm(&self, question: &str) -> io::Result<bool>;
}

/// How the working directory came to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    /// No repository was named; nothing to fetch.
    NoRepository,
    /// The checkout was already on disk.
    AlreadyPresent(PathBuf),
    /// Cloned on the first attempt.
    Cloned(PathBuf),
    /// Cloned after a create request.
    ClonedAfterCreate(PathBuf),
}

pub struct RepositoryAcquirer<'a> {
    remote: &'a dyn RemoteRepositoryService,
    confirm: &'a dyn Confirm,
}

impl<'a> RepositoryAcquirer<'a> {
    pub fn new(remote: &'a dyn RemoteRepositoryService, confirm: &'a dyn Confirm) -> Self {
        Self { remote, confirm }
    }

    pub fn acquire(&self, config: &Config) -> Result<Acquisition, GhCdError> {
        if config.repo.is_empty() {
            debug!("no repository named, skipping acquisition");
            return Ok(Acquisition::NoRepository);
        }

        ensure_base_dir(&config.base_dir)?;

        let dest = local_path(config);
        if dest.exists() {
            debug!(path = %dest.display(), "checkout already present");
            return Ok(Acquisition::AlreadyPresent(dest));
        }

        match config.order {
            AcquireOrder::CloneFirst => self.clone_first(config, dest),
            AcquireOrder::CreateFirst => self.create_first(config, dest),
        }
    }

    fn clone_first(&self, config: &Config, dest: PathBuf) -> Result<Acquisition, GhCdError> {
        let url = clone_url(config);
        if self.try_clone(&url, &dest) {
            return Ok(Acquisition::Cloned(dest));
        }

        if !config.create_repo {
            let accepted = self.confirm.confirm(
                "Could not clone repository, maybe it doesn't exist online, should I try to create it?",
            )?;
            if !accepted {
                return Err(GhCdError::CloneFailed(qualified_name(config)));
            }
        }

        self.create(config);

        if self.try_clone(&url, &dest) {
            Ok(Acquisition::ClonedAfterCreate(dest))
        } else {
            Err(GhCdError::CloneFailed(qualified_name(config)))
        }
    }

    fn create_first(&self, config: &Config, dest: PathBuf) -> Result<Acquisition, GhCdError> {
        self.create(config);

        if self.try_clone(&clone_url(config), &dest) {
            Ok(Acquisition::ClonedAfterCreate(dest))
        } else {
            Err(GhCdError::CloneFailed(qualified_name(config)))
        }
    }

    /// Clone and report whether the checkout exists afterwards.
    fn try_clone(&self, url: &str, dest: &Path) -> bool {
        output::info("Please wait...");
        if let Err(e) = self.remote.clone_repo(url, dest) {
            warn!(url, error = %format!("{:#}", e), "clone failed");
        }
        dest.exists()
    }

    /// Create failures are reported but never stop the workflow: the
    /// repository may already exist remotely.
    fn create(&self, config: &Config) {
        let name = qualified_name(config);
        match self.remote.create_repo(&name) {
            Ok(()) => output::success("Repository created"),
            Err(e) => {
                let err = GhCdError::CreateFailed {
                    name,
                    reason: format!("{:#}", e),
                };
                warn!(error = %err, "continuing after create failure");
                output::error(&err.to_string());
            }
        }
    }
}

/// Create the base directory (not its parents) when it is missing.
fn ensure_base_dir(base_dir: &Path) -> Result<(), GhCdError> {
    if !base_dir.exists() {
        debug!(path = %base_dir.display(), "creating base directory");
        std::fs::create_dir(base_dir)?;
    }
    Ok(())
}
