//! Validation helpers for run configuration.

use std::path::Path;
use std::time::Duration;

use seedsweep_fsops::{FsOpsError, TargetDirectory, normalize_lexically};
use url::Url;

use crate::error::{ConfigError, ConfigResult};
use crate::model::DaemonCredentials;

/// Assemble the daemon base URL from host, port and scheme.
pub(crate) fn validate_daemon_url(hostname: &str, port: u16, https: bool) -> ConfigResult<Url> {
    let host = hostname.trim();
    if host.is_empty() {
        return Err(ConfigError::invalid("hostname", "must not be empty", None));
    }
    if host.contains(['/', '?', '#', '@']) || host.chars().any(char::is_whitespace) {
        return Err(ConfigError::invalid(
            "hostname",
            "must be a bare IP address or host name",
            Some(host),
        ));
    }
    if port == 0 {
        return Err(ConfigError::invalid("port", "must be between 1 and 65535", Some("0")));
    }

    let scheme = if https { "https" } else { "http" };
    let authority = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_string()
    };
    Url::parse(&format!("{scheme}://{authority}:{port}/"))
        .map_err(|_| ConfigError::invalid("hostname", "does not form a valid URL", Some(host)))
}

/// Normalise optional credentials; a password without a username is refused.
pub(crate) fn validate_credentials(
    username: Option<String>,
    password: Option<String>,
) -> ConfigResult<Option<DaemonCredentials>> {
    let username = username.filter(|value| !value.trim().is_empty());
    let password = password.filter(|value| !value.is_empty());
    match (username, password) {
        (Some(username), password) => Ok(Some(DaemonCredentials {
            username,
            password: password.unwrap_or_default(),
        })),
        (None, Some(_)) => Err(ConfigError::invalid(
            "password",
            "requires a username",
            None,
        )),
        (None, None) => Ok(None),
    }
}

/// Convert a timeout in seconds, refusing zero.
pub(crate) fn validate_timeout(seconds: u64) -> ConfigResult<Duration> {
    if seconds == 0 {
        return Err(ConfigError::invalid("timeout", "must be at least one second", Some("0")));
    }
    Ok(Duration::from_secs(seconds))
}

/// Resolve the local directory against the working directory and build the target.
pub(crate) fn validate_target(
    directory: &Path,
    daemon_directory: Option<&Path>,
) -> ConfigResult<TargetDirectory> {
    let raw = directory.to_string_lossy();
    if normalize_lexically(directory).as_os_str().is_empty() {
        return Err(ConfigError::invalid(
            "directory",
            "must not be empty or the current directory",
            Some(&*raw),
        ));
    }
    let absolute = std::path::absolute(directory).map_err(|_| {
        ConfigError::invalid("directory", "cannot be resolved to an absolute path", Some(&*raw))
    })?;

    TargetDirectory::new(&absolute, daemon_directory).map_err(directory_error)
}

fn directory_error(err: FsOpsError) -> ConfigError {
    let FsOpsError::InvalidInput { field, reason, value } = err else {
        return ConfigError::invalid("directory", "was rejected", None);
    };
    ConfigError::InvalidField {
        field: if field == "daemon_view" {
            "daemon_directory"
        } else {
            "directory"
        },
        reason: describe_directory_reason(reason),
        value,
    }
}

const fn describe_directory_reason(reason: &'static str) -> &'static str {
    match reason.as_bytes() {
        b"empty" => "must not be empty",
        b"not_absolute" => "must be an absolute path",
        b"filesystem_root" => "must not be the filesystem root",
        _ => reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_from_host_and_port() -> ConfigResult<()> {
        assert_eq!(
            validate_daemon_url("nas.local", 8080, false)?.as_str(),
            "http://nas.local:8080/"
        );
        assert_eq!(
            validate_daemon_url(" 10.0.0.5 ", 443, true)?.as_str(),
            "https://10.0.0.5/"
        );
        Ok(())
    }

    #[test]
    fn ipv6_hosts_are_bracketed() -> ConfigResult<()> {
        assert_eq!(
            validate_daemon_url("::1", 8080, false)?.as_str(),
            "http://[::1]:8080/"
        );
        Ok(())
    }

    #[test]
    fn rejects_bad_hosts_and_ports() {
        for host in ["", "  ", "http://nas", "nas/qbt", "user@nas", "two words"] {
            assert!(
                matches!(
                    validate_daemon_url(host, 8080, false),
                    Err(ConfigError::InvalidField {
                        field: "hostname",
                        ..
                    })
                ),
                "{host:?}"
            );
        }
        assert!(matches!(
            validate_daemon_url("nas", 0, false),
            Err(ConfigError::InvalidField { field: "port", .. })
        ));
    }

    #[test]
    fn credentials_pairing() -> ConfigResult<()> {
        assert_eq!(validate_credentials(None, None)?, None);
        assert_eq!(validate_credentials(Some(String::new()), None)?, None);
        assert_eq!(
            validate_credentials(Some("admin".into()), None)?,
            Some(DaemonCredentials {
                username: "admin".into(),
                password: String::new(),
            })
        );
        assert!(validate_credentials(None, Some("secret".into())).is_err());
        Ok(())
    }

    #[test]
    fn zero_timeout_is_refused() {
        assert!(validate_timeout(0).is_err());
        assert!(validate_timeout(1).is_ok());
    }

    #[test]
    fn relative_directories_are_resolved() -> anyhow::Result<()> {
        let target = validate_target(Path::new("torrents/"), None)?;
        let expected = std::env::current_dir()?.join("torrents");
        assert_eq!(target.local(), expected.as_path());
        Ok(())
    }

    #[test]
    fn current_directory_is_refused() {
        for input in [".", "./", "", "torrents/.."] {
            let err = validate_target(Path::new(input), None)
                .expect_err("the working directory must never become the target");
            assert!(
                matches!(
                    err,
                    ConfigError::InvalidField {
                        field: "directory",
                        reason: "must not be empty or the current directory",
                        ..
                    }
                ),
                "{input:?}"
            );
        }
    }

    #[test]
    fn relative_daemon_directory_is_refused() {
        let err = validate_target(Path::new("/data"), Some(Path::new("downloads")))
            .expect_err("relative daemon directory must be refused");
        assert_eq!(
            err.to_string(),
            "invalid value for 'daemon_directory': must be an absolute path"
        );
    }
}
