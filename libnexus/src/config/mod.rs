//! Nexus credentials file.
//!
//! The credentials file is a small TOML document holding the registry host,
//! the basic-auth username and password, and the name of the Docker
//! repository hosted by Nexus:
//!
//! ```toml
//! # Nexus Credentials
//! nexus_host = "https://nexus.example.com"
//! nexus_username = "admin"
//! nexus_password = "secret"
//! nexus_repository = "docker-hosted"
//! ```
//!
//! `NEXUS_HOST`, `NEXUS_USERNAME`, `NEXUS_PASSWORD` and `NEXUS_REPOSITORY`
//! environment variables override the values read from the file.

use crate::auth::Credentials;
use crate::error::{NexusError, Result};
use config::{Config as ConfigRs, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;


/// Default file name of the credentials file, looked up in the working directory.
pub const CREDENTIALS_FILE: &str = ".credentials";

const CREDENTIALS_HEADER: &str = "# Nexus Credentials\n";

/// Connection settings for a Nexus-hosted Docker registry.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL of the Nexus server (e.g. "https://nexus.example.com")
    #[serde(rename = "nexus_host")]
    pub host: String,
    /// Basic-auth username
    #[serde(rename = "nexus_username")]
    pub username: String,
    /// Basic-auth password
    #[serde(rename = "nexus_password")]
    pub password: String,
    /// Name of the Docker repository inside Nexus
    #[serde(rename = "nexus_repository")]
    pub repository: String,
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("repository", &self.repository)
            .finish()
    }
}

impl RegistryConfig {
    /// Creates a configuration from its four fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::config::RegistryConfig;
    ///
    /// let config = RegistryConfig::new("http://localhost:8081", "admin", "admin123", "docker");
    /// assert_eq!(config.repository, "docker");
    /// ```
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            repository: repository.into(),
        }
    }

    /// Loads the credentials file at `path`, applying `NEXUS_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::Configuration`] if the file does not exist, cannot be
    /// read, is not valid TOML, or lacks one of the four fields.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Loads the credentials file using an explicit map in place of the process
    /// environment. Keys are environment variable names (e.g. `NEXUS_HOST`).
    pub fn load_with_env(path: &Path, env: Option<HashMap<String, String>>) -> Result<Self> {
        let display = path.display().to_string();

        if !path.exists() {
            return Err(NexusError::configuration(
                format!("{} file not found", display),
                Some(display.clone()),
            ));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            NexusError::configuration_with_source(
                "Failed to read credentials file",
                Some(display.as_str()),
                e,
            )
        })?;

        Self::from_toml_str(&contents, env).map_err(|e| match e {
            NexusError::Configuration {
                message, source, ..
            } => NexusError::Configuration {
                message,
                path: Some(display),
                source,
            },
            other => other,
        })
    }

    /// Parses credentials from a TOML string, applying environment overrides.
    pub fn from_toml_str(contents: &str, env: Option<HashMap<String, String>>) -> Result<Self> {
        let environment = Environment::default()
            .prefix("NEXUS")
            .keep_prefix(true)
            .source(env);

        let config: Self = ConfigRs::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .add_source(environment)
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| {
                NexusError::configuration_with_source(
                    "Failed to parse credentials file",
                    None::<&str>,
                    e,
                )
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that host and repository are usable.
    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(NexusError::configuration("nexus_host must not be empty", None));
        }
        if self.repository.trim().is_empty() {
            return Err(NexusError::configuration(
                "nexus_repository must not be empty",
                None,
            ));
        }
        Ok(())
    }

    /// Renders the credentials file contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::config::RegistryConfig;
    ///
    /// let config = RegistryConfig::new("http://nexus:8081", "admin", "pw", "docker");
    /// let text = config.to_toml_string().unwrap();
    /// assert!(text.contains("nexus_host = \"http://nexus:8081\""));
    /// ```
    pub fn to_toml_string(&self) -> Result<String> {
        let body = toml::to_string(self).map_err(|e| {
            NexusError::configuration_with_source(
                "Failed to serialize credentials",
                None::<&str>,
                e,
            )
        })?;
        Ok(format!("{}{}", CREDENTIALS_HEADER, body))
    }

    /// Writes the credentials file with user-only permissions.
    pub fn save(&self, path: &Path) -> Result<()> {
        let display = path.display().to_string();
        let contents = self.to_toml_string()?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                NexusError::configuration_with_source(
                    "Failed to create credentials directory",
                    Some(display.as_str()),
                    e,
                )
            })?;
        }

        fs::write(path, contents).map_err(|e| {
            NexusError::configuration_with_source(
                "Failed to write credentials file",
                Some(display.as_str()),
                e,
            )
        })?;

        // Set file permissions to 0600 (user read/write only) on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, permissions).map_err(|e| {
                NexusError::configuration_with_source(
                    "Failed to set credentials file permissions",
                    Some(display.as_str()),
                    e,
                )
            })?;
        }

        Ok(())
    }

    /// Returns the basic-auth credentials for this registry.
    pub fn credentials(&self) -> Credentials {
        Credentials::basic(&self.username, &self.password)
    }
}
