//! Daemon client wiring and CLI error types.

use std::fmt::{self, Display, Formatter};

use anyhow::anyhow;
use seedsweep_config::{DaemonConfig, DaemonCredentials};
use seedsweep_qbit::{QbitClient, QbitCredentials};

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Dependencies constructed from the validated configuration.
#[derive(Debug, Clone)]
pub(crate) struct CliDependencies {
    pub(crate) client: QbitClient,
}

impl CliDependencies {
    /// Construct the daemon client with the configured timeout.
    pub(crate) fn from_config(daemon: &DaemonConfig) -> CliResult<Self> {
        let client = QbitClient::new(
            daemon.base_url.clone(),
            daemon.credentials.as_ref().map(qbit_credentials),
            daemon.timeout,
        )
        .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;
        Ok(Self { client })
    }
}

fn qbit_credentials(credentials: &DaemonCredentials) -> QbitCredentials {
    QbitCredentials {
        username: credentials.username.clone(),
        password: credentials.password.clone(),
    }
}
