//! The persisted settings layer: the `[gh-cd]` section of `~/.gitconfig`.
//!
//! Parsing is left to `git config` itself; this module only turns its
//! `--get-regexp` output into key/value pairs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

/// Section name inside the git config file.
pub const SECTION: &str = "gh-cd";

/// Settings keyed by their lowercase name, without the section prefix.
pub type PersistedLayer = BTreeMap<String, String>;

/// Location of the persisted layer for a given home directory.
pub fn default_path(home: &Path) -> PathBuf {
    home.join(".gitconfig")
}

/// Read the persisted layer from `path`.
///
/// A missing file, a missing section or a missing `git` binary all yield an
/// empty layer.
pub fn load(path: &Path) -> PersistedLayer {
    if !path.exists() {
        debug!(path = %path.display(), "no persisted configuration");
        return PersistedLayer::new();
    }

    let pattern = format!(r"^{}\.", SECTION);
    let output = Command::new("git")
        .arg("config")
        .arg("--file")
        .arg(path)
        .args(["--get-regexp", &pattern])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();

    let output = match output {
        Ok(o) => o,
        Err(e) => {
            warn!(error = %e, "could not run git to read persisted configuration");
            return PersistedLayer::new();
        }
    };

    // git exits with 1 when nothing matched.
    if !output.status.success() {
        if output.status.code() != Some(1) {
            warn!(
                path = %path.display(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git config failed, ignoring persisted configuration"
            );
        }
        return PersistedLayer::new();
    }

    parse_get_regexp(&String::from_utf8_lossy(&output.stdout))
}

/// Parse `git config --get-regexp` output (`section.key value` per line).
///
/// Later lines win for repeated keys, matching git's own last-one-wins rule.
pub fn parse_get_regexp(output: &str) -> PersistedLayer {
    let prefix = format!("{}.", SECTION);
    let mut layer = PersistedLayer::new();

    for line in output.lines() {
        let (name, value) = match line.split_once(' ') {
            Some((name, value)) => (name, value),
            None => (line, ""),
        };
        if let Some(key) = name.strip_prefix(&prefix) {
            layer.insert(key.to_ascii_lowercase(), value.to_string());
        }
    }

    layer
}

/// Interpret a git-style boolean. Returns `None` for anything unrecognised.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
