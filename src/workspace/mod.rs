pub mod acquire;

use std::path::PathBuf;

use crate::config::{Config, Protocol};

/// Host directory every workspace lives under.
pub const HOST: &str = "github.com";

/// Local checkout location: `<base_dir>/github.com/<account>/<repo>`.
pub fn local_path(config: &Config) -> PathBuf {
    let mut path = config.base_dir.join(HOST).join(&config.account);
    if !config.repo.is_empty() {
        path.push(&config.repo);
    }
    path
}

pub fn ssh_url(config: &Config) -> String {
    format!("git@{}:{}/{}.git", HOST, config.account, config.repo)
}

pub fn https_url(config: &Config) -> String {
    format!("https://{}/{}/{}.git", HOST, config.account, config.repo)
}

/// Clone URL for the configured protocol.
pub fn clone_url(config: &Config) -> String {
    match config.protocol {
        Protocol::Ssh => ssh_url(config),
        Protocol::Https => https_url(config),
    }
}

/// `account/repo`, as understood by the GitHub CLI.
pub fn qualified_name(config: &Config) -> String {
    format!("{}/{}", config.account, config.repo)
}

/// Directory the shell should start in: the checkout, or the base directory
/// when no repository was named.
pub fn working_dir(config: &Config) -> PathBuf {
    if config.repo.is_empty() {
        config.base_dir.clone()
    } else {
        local_path(config)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::AcquireOrder;

    pub(crate) fn config(account: &str, repo: &str, base: &str) -> Config {
        Config {
            account: account.to_string(),
            repo: repo.to_string(),
            protocol: Protocol::Ssh,
            base_dir: PathBuf::from(base),
            create_repo: true,
            shell_command: Vec::new(),
            order: AcquireOrder::CloneFirst,
        }
    }

    #[test]
    fn local_path_nests_host_account_and_repo() {
        let cfg = config("alice", "proj", "/home/u/repo");
        assert_eq!(
            local_path(&cfg),
            PathBuf::from("/home/u/repo")
                .join("github.com")
                .join("alice")
                .join("proj")
        );
    }

    #[test]
    fn local_path_without_repo_stops_at_account() {
        let cfg = config("bob", "", "/home/u/repo");
        assert_eq!(
            local_path(&cfg),
            PathBuf::from("/home/u/repo").join("github.com").join("bob")
        );
    }

    #[test]
    fn urls_follow_github_formats() {
        let cfg = config("alice", "proj", "/home/u/repo");
        assert_eq!(ssh_url(&cfg), "git@github.com:alice/proj.git");
        assert_eq!(https_url(&cfg), "https://github.com/alice/proj.git");
        assert_eq!(qualified_name(&cfg), "alice/proj");
    }

    #[test]
    fn clone_url_follows_protocol() {
        let mut cfg = config("alice", "proj", "/home/u/repo");
        assert_eq!(clone_url(&cfg), "git@github.com:alice/proj.git");
        cfg.protocol = Protocol::Https;
        assert_eq!(clone_url(&cfg), "https://github.com/alice/proj.git");
    }

    #[test]
    fn working_dir_is_base_dir_without_repo() {
        let cfg = config("bob", "", "/home/u/repo");
        assert_eq!(working_dir(&cfg), PathBuf::from("/home/u/repo"));
        let cfg = config("bob", "proj", "/home/u/repo");
        assert_eq!(working_dir(&cfg), local_path(&cfg));
    }
}
