//! Detection of ANSI colour support for an output stream
//!
//! The decision is split in two: [`ColourEnvironment`] captures the facts
//! (TTY-ness, platform, environment markers), and
//! [`ColourEnvironment::supports_colour`] applies the rule table to them.

use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::Path;

const DOCKERENV_MARKER: &str = "/.dockerenv";
const CGROUP_PATH: &str = "/proc/self/cgroup";

/// Knobs for the two behaviours that differ between deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColourPolicy {
    /// IDE-embedded terminals only get colour when the stream is a TTY
    pub ide_requires_tty: bool,
    /// Containers get colour on non-Windows platforms even without a TTY
    pub container_counts_as_tty: bool,
}

impl Default for ColourPolicy {
    fn default() -> Self {
        Self {
            ide_requires_tty: true,
            container_counts_as_tty: true,
        }
    }
}

impl ColourPolicy {
    #[must_use]
    pub fn with_ide_requires_tty(mut self, required: bool) -> Self {
        self.ide_requires_tty = required;
        self
    }

    #[must_use]
    pub fn with_container_counts_as_tty(mut self, enabled: bool) -> Self {
        self.container_counts_as_tty = enabled;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// Snapshot of everything the colour decision depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColourEnvironment {
    pub is_tty: bool,
    pub platform: Platform,
    /// PyCharm-hosted run console or the VS Code integrated terminal
    pub ide_hosted: bool,
    /// ANSICON (ConEmu and friends) or Windows Terminal
    pub windows_ansi_host: bool,
    pub in_container: bool,
}

impl ColourEnvironment {
    /// Capture the environment for `stream` from the running process
    pub fn capture<S: IsTerminal>(stream: &S) -> Self {
        Self {
            is_tty: stream.is_terminal(),
            platform: Platform::current(),
            ide_hosted: std::env::var_os("PYCHARM_HOSTED").is_some()
                || std::env::var("TERM_PROGRAM").map(|v| v == "vscode").unwrap_or(false),
            windows_ansi_host: std::env::var_os("ANSICON").is_some()
                || std::env::var_os("WT_SESSION").is_some(),
            in_container: is_container(),
        }
    }

    /// Non-interactive stream with no markers set
    pub fn plain(platform: Platform) -> Self {
        Self {
            is_tty: false,
            platform,
            ide_hosted: false,
            windows_ansi_host: false,
            in_container: false,
        }
    }

    pub fn supports_colour(&self, policy: &ColourPolicy) -> bool {
        if self.ide_hosted {
            return self.is_tty || !policy.ide_requires_tty;
        }

        match self.platform {
            Platform::Unix => {
                self.is_tty || (policy.container_counts_as_tty && self.in_container)
            }
            Platform::Windows => self.is_tty && self.windows_ansi_host,
        }
    }
}

/// Whether ANSI colour codes are safe to write to `stream`
pub fn supports_colour<S: IsTerminal>(stream: &S, policy: &ColourPolicy) -> bool {
    ColourEnvironment::capture(stream).supports_colour(policy)
}

/// Docker does not consistently attach a TTY, so it is detected separately.
/// Unreadable markers count as "not a container".
pub fn is_container() -> bool {
    if Path::new(DOCKERENV_MARKER).exists() {
        return true;
    }
    std::fs::read_to_string(CGROUP_PATH)
        .map(|content| cgroup_mentions_docker(&content))
        .unwrap_or(false)
}

fn cgroup_mentions_docker(content: &str) -> bool {
    content.lines().any(|line| line.contains("docker"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(platform: Platform) -> ColourEnvironment {
        ColourEnvironment::plain(platform)
    }

    #[test]
    fn test_plain_stream_without_markers() {
        let policy = ColourPolicy::default();
        assert!(!env(Platform::Windows).supports_colour(&policy));
        assert!(!env(Platform::Unix).supports_colour(&policy));
    }

    #[test]
    fn test_unix_tty() {
        let mut e = env(Platform::Unix);
        e.is_tty = true;
        assert!(e.supports_colour(&ColourPolicy::default()));
    }

    #[test]
    fn test_unix_container_without_tty() {
        let mut e = env(Platform::Unix);
        e.in_container = true;
        assert!(e.supports_colour(&ColourPolicy::default()));

        let policy = ColourPolicy::default().with_container_counts_as_tty(false);
        assert!(!e.supports_colour(&policy));
    }

    #[test]
    fn test_windows_requires_tty_and_marker() {
        let mut e = env(Platform::Windows);
        e.is_tty = true;
        assert!(!e.supports_colour(&ColourPolicy::default()));

        e.windows_ansi_host = true;
        assert!(e.supports_colour(&ColourPolicy::default()));

        e.is_tty = false;
        assert!(!e.supports_colour(&ColourPolicy::default()));
    }

    #[test]
    fn test_windows_ignores_container() {
        let mut e = env(Platform::Windows);
        e.in_container = true;
        assert!(!e.supports_colour(&ColourPolicy::default()));
    }

    #[test]
    fn test_ide_gated_by_tty() {
        let mut e = env(Platform::Windows);
        e.ide_hosted = true;
        assert!(!e.supports_colour(&ColourPolicy::default()));

        e.is_tty = true;
        assert!(e.supports_colour(&ColourPolicy::default()));
    }

    #[test]
    fn test_ide_ungated() {
        let policy = ColourPolicy::default().with_ide_requires_tty(false);
        let mut e = env(Platform::Windows);
        e.ide_hosted = true;
        assert!(e.supports_colour(&policy));
    }

    #[test]
    fn test_ide_non_tty_in_container_is_not_coloured() {
        let mut e = env(Platform::Unix);
        e.ide_hosted = true;
        e.in_container = true;
        assert!(!e.supports_colour(&ColourPolicy::default()));
    }

    #[test]
    fn test_cgroup_parsing() {
        assert!(cgroup_mentions_docker("12:pids:/docker/abc123\n0::/"));
        assert!(!cgroup_mentions_docker("0::/user.slice/session-2.scope"));
    }

    #[test]
    fn test_file_stream_is_not_a_tty() {
        let file = tempfile::tempfile().unwrap();
        let captured = ColourEnvironment::capture(&file);
        assert!(!captured.is_tty);
    }
}
