//! Run configuration models.

use std::path::PathBuf;
use std::time::Duration;

use seedsweep_fsops::{ReconcileMode, TargetDirectory};
use url::Url;

use crate::error::ConfigResult;
use crate::validate::{validate_credentials, validate_daemon_url, validate_target, validate_timeout};

/// Default daemon host.
pub const DEFAULT_HOSTNAME: &str = "127.0.0.1";
/// Default qBittorrent Web UI port.
pub const DEFAULT_PORT: u16 = 8080;
/// Default directory swept when none is given.
pub const DEFAULT_DIRECTORY: &str = "/var/torrents/";
/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Raw, unvalidated inputs gathered from flags and environment.
#[derive(Debug, Clone)]
pub struct SweepInputs {
    /// IP or FQDN of the daemon.
    pub hostname: String,
    /// Web API port.
    pub port: u16,
    /// Use HTTPS instead of HTTP.
    pub https: bool,
    /// Web UI username, if authentication is required.
    pub username: Option<String>,
    /// Web UI password.
    pub password: Option<String>,
    /// Local directory to sweep.
    pub directory: PathBuf,
    /// The same directory as the daemon sees it, when different.
    pub daemon_directory: Option<PathBuf>,
    /// Report only, never delete.
    pub dry_run: bool,
    /// Emit per-torrent diagnostics.
    pub verbose: bool,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SweepInputs {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_HOSTNAME.to_string(),
            port: DEFAULT_PORT,
            https: false,
            username: None,
            password: None,
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            daemon_directory: None,
            dry_run: false,
            verbose: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Web UI credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct DaemonCredentials {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

impl std::fmt::Debug for DaemonCredentials {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("DaemonCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// How to reach the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    /// Base URL of the Web API.
    pub base_url: Url,
    /// Credentials; `None` relies on the daemon's authentication bypass.
    pub credentials: Option<DaemonCredentials>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Validated, immutable configuration for one sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Daemon connection.
    pub daemon: DaemonConfig,
    /// Directory being swept.
    pub target: TargetDirectory,
    /// Dry-run or execute, fixed for the whole run.
    pub mode: ReconcileMode,
    /// Emit per-torrent diagnostics.
    pub verbose: bool,
}

impl SweepConfig {
    /// Validate raw inputs into a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError`] naming the first field that fails
    /// validation.
    pub fn from_inputs(inputs: SweepInputs) -> ConfigResult<Self> {
        let base_url = validate_daemon_url(&inputs.hostname, inputs.port, inputs.https)?;
        let credentials = validate_credentials(inputs.username, inputs.password)?;
        let timeout = validate_timeout(inputs.timeout_secs)?;
        let target = validate_target(&inputs.directory, inputs.daemon_directory.as_deref())?;

        Ok(Self {
            daemon: DaemonConfig {
                base_url,
                credentials,
                timeout,
            },
            target,
            mode: ReconcileMode::from_dry_run(inputs.dry_run),
            verbose: inputs.verbose,
        })
    }
}
