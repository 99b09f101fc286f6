//! Configuration management
//!
//! This module handles loading layered TOML configuration files
//! and merging CLI overrides on top of them.

use log::debug;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{defaults, timeouts};
use crate::core::error::{PathfinderError, Result};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Mail sender, recipient and subject settings
    pub email: EmailConfig,

    /// Probe settings
    pub scrape: ScrapeConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmailConfig {
    /// Sender address, also used as the SMTP login
    pub from: Option<String>,

    /// Recipient address
    pub to: Option<String>,

    /// SMTP password for the sender
    pub password: Option<String>,

    /// Subject used when `--subject` is not given
    pub default_subject: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrapeConfig {
    /// Timeout in seconds for each probe
    pub timeout: Option<f64>,
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub timeout: Option<f64>,      // --timeout
    pub config_dir: Option<String>, // --config-dir
    pub no_user_config: bool,      // --no-user-config
}

/// Explicit sender/recipient/password that win over the configured values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailOverrides {
    pub from: Option<String>,
    pub to: Option<String>,
    pub password: Option<String>,
}

/// Fully resolved credentials for one mail dispatch.
#[derive(Clone, PartialEq, Eq)]
pub struct MailCredentials {
    pub from: String,
    pub to: String,
    pub password: String,
}

impl std::fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailCredentials")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("password", &"***")
            .finish()
    }
}

/// The ordered list of files a configuration is layered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSources {
    /// Directory holding the base and local files
    pub config_dir: PathBuf,
    /// Per-user override file, if it should be consulted
    pub user_file: Option<PathBuf>,
}

impl ConfigSources {
    /// Work out where to look for configuration.
    ///
    /// The directory comes from `config_dir`, then `PATHFINDER_CONFIG_DIR`,
    /// then `etc` relative to the working directory.
    pub fn resolve(config_dir: Option<&str>, include_user: bool) -> Self {
        let config_dir = match config_dir {
            Some(dir) => PathBuf::from(dir),
            None => std::env::var_os(defaults::CONFIG_DIR_ENV)
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(defaults::CONFIG_DIR)),
        };

        let user_file = if include_user {
            dirs::config_dir().map(|dir| {
                dir.join(defaults::USER_CONFIG_DIR)
                    .join(defaults::USER_CONFIG_FILE)
            })
        } else {
            None
        };

        Self {
            config_dir,
            user_file,
        }
    }

    /// Files in the order they are applied; later files win.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![
            self.config_dir.join(defaults::BASE_CONFIG_FILE),
            self.config_dir.join(defaults::LOCAL_CONFIG_FILE),
        ];
        if let Some(ref user_file) = self.user_file {
            paths.push(user_file.clone());
        }
        paths
    }
}

impl Config {
    /// Parse a single TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PathfinderError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            PathfinderError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Layer every existing file in `paths` on top of the defaults.
    ///
    /// Missing files are skipped. A file that exists but cannot be read or
    /// parsed is an error. Values are not range-checked here; call
    /// [`Config::validate`] once CLI overrides have been merged.
    pub fn load_layered(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Self::default();

        for path in paths {
            match fs::metadata(path) {
                Ok(_) => {
                    let layer = Self::load_from_file(path)?;
                    debug!("Loaded config file {}", path.display());
                    config.merge(layer);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("Skipping missing config file {}", path.display());
                }
                Err(e) => {
                    return Err(PathfinderError::Config(format!(
                        "Could not read config file '{}': {}",
                        path.display(),
                        e
                    )));
                }
            }
        }

        Ok(config)
    }

    /// Load from the standard locations described by `sources`
    pub fn load(sources: &ConfigSources) -> Result<Self> {
        Self::load_layered(&sources.paths())
    }

    /// Overlay every value present in `other` onto `self`
    pub fn merge(&mut self, other: Config) {
        let Config { email, scrape } = other;

        if email.from.is_some() {
            self.email.from = email.from;
        }
        if email.to.is_some() {
            self.email.to = email.to;
        }
        if email.password.is_some() {
            self.email.password = email.password;
        }
        if email.default_subject.is_some() {
            self.email.default_subject = email.default_subject;
        }
        if scrape.timeout.is_some() {
            self.scrape.timeout = scrape.timeout;
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(timeout) = cli_config.timeout {
            self.scrape.timeout = Some(timeout);
        }
    }

    /// Get probe timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds())
    }

    pub fn timeout_seconds(&self) -> f64 {
        self.scrape
            .timeout
            .unwrap_or(timeouts::DEFAULT_PROBE_TIMEOUT_SECONDS)
    }

    /// Subject used when none is given on the command line
    pub fn default_subject(&self) -> &str {
        self.email
            .default_subject
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults::SUBJECT)
    }

    /// Resolve sender, recipient and password, preferring `overrides`.
    pub fn mail_credentials(&self, overrides: &MailOverrides) -> Result<MailCredentials> {
        fn pick(
            explicit: &Option<String>,
            configured: &Option<String>,
            key: &str,
        ) -> Result<String> {
            explicit
                .as_ref()
                .or(configured.as_ref())
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| {
                    PathfinderError::Config(format!(
                        "Missing [email] {key}. Set it in the config file to send mail."
                    ))
                })
        }

        Ok(MailCredentials {
            from: pick(&overrides.from, &self.email.from, "from")?,
            to: pick(&overrides.to, &self.email.to, "to")?,
            password: pick(&overrides.password, &self.email.password, "password")?,
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.scrape.timeout {
            if !timeout.is_finite() || timeout <= 0.0 {
                return Err(PathfinderError::Config(format!(
                    "Timeout of {timeout} is invalid. Expected a positive number of seconds."
                )));
            }
            if timeout > timeouts::MAX_PROBE_TIMEOUT_SECONDS {
                return Err(PathfinderError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>1 hour). Consider using a smaller value."
                )));
            }
        }

        Ok(())
    }
}
