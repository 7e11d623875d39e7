//! Access to GitHub: identity lookup, clone, and repository creation.
//!
//! [`RemoteRepositoryService`] is the seam the acquisition workflow talks
//! to. [`GhCli`] implements it on top of the `gh` command-line tool, which
//! owns authentication.

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::cli::output;

pub trait RemoteRepositoryService {
    /// Login of the authenticated user.
    fn authenticated_user(&self) -> Result<String>;

    /// Clone `url` (recursively, with submodules) into `dest`.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()>;

    /// Create the public repository `qualified_name` (`account/repo`).
    fn create_repo(&self, qualified_name: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct User {
    login: String,
}

/// [`RemoteRepositoryService`] backed by the `gh` CLI.
pub struct GhCli {
    program: String,
}

impl Default for GhCli {
    fn default() -> Self {
        Self {
            program: "gh".to_string(),
        }
    }
}

impl GhCli {
    fn command(&self) -> Result<Command> {
        let path = which::which(&self.program).with_context(|| {
            format!(
                "{} not found on PATH -- install the GitHub CLI: https://cli.github.com",
                self.program
            )
        })?;
        Ok(Command::new(path))
    }
}

impl RemoteRepositoryService for GhCli {
    fn authenticated_user(&self) -> Result<String> {
        info!("looking up authenticated GitHub user");
        let mut cmd = self.command()?;
        let pb = output::spinner("Looking up GitHub account...");
        let result = cmd
            .args(["api", "user"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .context("failed to run gh api user");
        pb.finish_and_clear();

        let out = result?;
        if !out.status.success() {
            bail!(
                "gh api user failed: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            );
        }
        parse_login(&out.stdout)
    }

    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        info!(url, dest = %dest.display(), "cloning repository");
        // Progress from git is useful here, so stdio stays attached.
        let status = self
            .command()?
            .args(["repo", "clone", url])
            .arg(dest)
            .args(["--", "--recursive"])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("failed to run gh repo clone {}", url))?;

        if !status.success() {
            bail!("gh repo clone {} exited with {}", url, status);
        }
        Ok(())
    }

    fn create_repo(&self, qualified_name: &str) -> Result<()> {
        info!(repo = qualified_name, "creating repository");
        let mut cmd = self.command()?;
        let pb = output::spinner(&format!("Creating {}...", qualified_name));
        let result = cmd
            .args(["repo", "create", qualified_name, "--public"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("failed to run gh repo create {}", qualified_name));
        pb.finish_and_clear();

        let out = result?;
        if !out.status.success() {
            bail!("{}", String::from_utf8_lossy(&out.stderr).trim());
        }
        Ok(())
    }
}

fn parse_login(stdout: &[u8]) -> Result<String> {
    let user: User = serde_json::from_slice(stdout).context("unexpected response from gh api user")?;
    Ok(user.login)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_login_reads_login_field() {
        let body = br#"{"login": "octocat", "id": 1, "type": "User"}"#;
        assert_eq!(parse_login(body).unwrap(), "octocat");
    }

    #[test]
    fn parse_login_rejects_garbage() {
        assert!(parse_login(b"not json").is_err());
        assert!(parse_login(br#"{"id": 1}"#).is_err());
    }

    #[test]
    fn missing_binary_is_reported() {
        let gh = GhCli {
            program: "gh-cd-definitely-not-a-real-binary".to_string(),
        };
        let err = gh.create_repo("a/b").unwrap_err();
        assert!(err.to_string().contains("not found on PATH"));
    }
}
