//! Application context that holds resolved settings
//!
//! The context is built once at startup from CLI flags, environment
//! variables and the filesystem, then passed read-only to every command.

use crate::format::ColorChoice;
use libnexus::config::CREDENTIALS_FILE;
use std::env;
use std::path::{Path, PathBuf};

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

/// Directory name used under the user's config directory.
pub const APP_DIR: &str = "nexus-cli";

/// Verbosity of diagnostic output on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Only results and errors
    Normal,
    /// `-v`: high-level progress
    Verbose,
    /// `-vv`: request-level details
    VeryVerbose,
    /// `-vvv`: everything
    Trace,
}

impl VerbosityLevel {
    /// Map the number of `-v` flags to a level
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::VeryVerbose,
            _ => Self::Trace,
        }
    }

    /// Default tracing filter directive for this level
    pub fn tracing_directive(&self) -> &'static str {
        match self {
            Self::Normal => "error",
            Self::Verbose => "warn",
            Self::VeryVerbose => "libnexus=debug,warn",
            Self::Trace => "trace",
        }
    }
}

/// Immutable program settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Program name
    pub name: &'static str,
    /// Program version
    pub version: &'static str,
    /// Program authors
    pub authors: &'static str,
    /// Credentials file used by every registry command
    pub credentials_path: PathBuf,
}

impl Settings {
    /// Build settings for this binary with the given credentials path
    pub fn new(credentials_path: PathBuf) -> Self {
        Self {
            name: env!("CARGO_BIN_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            authors: env!("CARGO_PKG_AUTHORS"),
            credentials_path,
        }
    }
}

/// Application context with resolved settings and runtime state
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Program settings
    pub settings: Settings,
    /// Resolved color choice
    pub color: ColorChoice,
    /// Verbosity for diagnostic output
    pub verbosity: VerbosityLevel,
}

impl AppContext {
    /// Build context with precedence: defaults > env vars > CLI flags
    pub fn build(
        cli_color: ColorChoice,
        verbosity: VerbosityLevel,
        credentials: Option<PathBuf>,
    ) -> Self {
        // An explicit --color wins; otherwise NEXUS_COLOR may override auto
        let color = match env::var("NEXUS_COLOR") {
            Ok(value) if cli_color == ColorChoice::Auto => ColorChoice::from_env_value(&value),
            _ => cli_color,
        };

        let working_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let config_dir = dirs::config_dir();
        let credentials_path =
            resolve_credentials_path(credentials.as_deref(), &working_dir, config_dir.as_deref());

        Self {
            settings: Settings::new(credentials_path),
            color,
            verbosity,
        }
    }
}

/// Resolve which credentials file to use.
///
/// An explicit path always wins. Otherwise `.credentials` in the working
/// directory is used if present, then `<config dir>/nexus-cli/credentials`.
/// When neither exists the working-directory file is returned, which is
/// where `configure` writes.
pub fn resolve_credentials_path(
    explicit: Option<&Path>,
    working_dir: &Path,
    config_dir: Option<&Path>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let local = working_dir.join(CREDENTIALS_FILE);
    if local.exists() {
        return local;
    }

    if let Some(dir) = config_dir {
        let global = dir.join(APP_DIR).join("credentials");
        if global.exists() {
            return global;
        }
    }

    local
}
