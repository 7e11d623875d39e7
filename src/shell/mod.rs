//! Launching the interactive session inside the workspace.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use tracing::info;

use crate::config::Config;
use crate::error::GhCdError;

/// Used when neither `shell-cmd` nor `$SHELL` is set.
pub const FALLBACK_SHELL: &str = "/bin/sh";

/// Pick the argv to run: `shell-cmd`, then `$SHELL`, then `/bin/sh`.
pub fn select_command(config: &Config, env_shell: Option<String>) -> Vec<String> {
    if !config.shell_command.is_empty() {
        return config.shell_command.clone();
    }
    match env_shell {
        Some(shell) if !shell.trim().is_empty() => vec![shell],
        _ => vec![FALLBACK_SHELL.to_string()],
    }
}

/// Run the shell in `working_dir` with inherited stdio and wait for it.
///
/// The working directory is created (with parents) if it does not exist.
pub fn launch(config: &Config, working_dir: &Path) -> Result<ExitStatus, GhCdError> {
    if !working_dir.exists() {
        std::fs::create_dir_all(working_dir)?;
    }

    let argv = select_command(config, std::env::var("SHELL").ok());
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| GhCdError::Config("empty shell command".into()))?;

    info!(program, ?args, dir = %working_dir.display(), "launching shell");
    Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .env("GH_CD_ACCOUNT", &config.account)
        .env("GH_CD_REPO", &config.repo)
        .env("GH_CD_DIR", working_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| GhCdError::Launch {
            command: argv.join(" "),
            source,
        })
}

/// Exit code to hand back to our own caller for the shell's status.
///
/// A child killed by a signal maps to `128 + signal`, as shells do.
pub fn exit_code(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return (code & 0xff) as u8;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return (128 + signal).min(255) as u8;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::tests::config;

    #[test]
    fn configured_command_wins() {
        let mut cfg = config("alice", "proj", "/tmp");
        cfg.shell_command = vec!["tmux".into(), "new".into(), "-A".into()];
        assert_eq!(
            select_command(&cfg, Some("/bin/zsh".into())),
            vec!["tmux", "new", "-A"]
        );
    }

    #[test]
    fn env_shell_is_second_choice() {
        let cfg = config("alice", "proj", "/tmp");
        assert_eq!(select_command(&cfg, Some("/bin/zsh".into())), vec!["/bin/zsh"]);
    }

    #[test]
    fn falls_back_to_posix_shell() {
        let cfg = config("alice", "proj", "/tmp");
        assert_eq!(select_command(&cfg, None), vec![FALLBACK_SHELL]);
        assert_eq!(select_command(&cfg, Some(String::new())), vec![FALLBACK_SHELL]);
    }

    #[cfg(unix)]
    #[test]
    fn launch_runs_in_working_dir_and_reports_status() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let work = dir.path().join("base");
        let marker = dir.path().join("pwd.txt");
        let mut cfg = config("bob", "", &work.to_string_lossy());
        cfg.shell_command = vec![
            "sh".into(),
            "-c".into(),
            format!("pwd > {}; exit 3", marker.display()),
        ];

        let status = launch(&cfg, &work).expect("launch should succeed");

        assert_eq!(exit_code(status), 3);
        assert!(work.is_dir(), "working dir should be created");
        let pwd = std::fs::read_to_string(&marker).expect("marker written");
        assert_eq!(
            std::fs::canonicalize(pwd.trim()).unwrap(),
            std::fs::canonicalize(&work).unwrap()
        );
    }

    #[cfg(unix)]
    #[test]
    fn launch_exports_session_variables() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let marker = dir.path().join("env.txt");
        let mut cfg = config("alice", "proj", &dir.path().to_string_lossy());
        cfg.shell_command = vec![
            "sh".into(),
            "-c".into(),
            format!("echo \"$GH_CD_ACCOUNT/$GH_CD_REPO\" > {}", marker.display()),
        ];

        let status = launch(&cfg, dir.path()).expect("launch should succeed");

        assert!(status.success());
        let text = std::fs::read_to_string(&marker).expect("marker written");
        assert_eq!(text.trim(), "alice/proj");
    }

    #[test]
    fn missing_program_is_launch_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut cfg = config("bob", "", &dir.path().to_string_lossy());
        cfg.shell_command = vec!["gh-cd-definitely-not-a-real-shell".into()];

        let err = launch(&cfg, dir.path()).unwrap_err();

        assert!(matches!(err, GhCdError::Launch { .. }));
        assert_eq!(err.exit_code(), 127);
    }
}
