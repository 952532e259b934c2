//! Argument parsing, logging setup, and exit code mapping.

use std::path::PathBuf;

use clap::Parser;
use seedsweep_config::{
    DEFAULT_DIRECTORY, DEFAULT_HOSTNAME, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, SweepConfig,
    SweepInputs,
};
use seedsweep_telemetry::{LogFormat, LoggingConfig, init_logging};

use crate::client::{CliDependencies, CliError, CliResult};
use crate::commands::sweep::{SweepOutcome, handle_sweep};

/// Parses CLI arguments, runs one sweep, and returns the process exit code.
///
/// `0` is a clean run, `2` a validation error, `3` a fatal failure, and `4` a
/// finished run in which some entries failed or were refused.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    run_with_cli(cli).await
}

async fn run_with_cli(cli: Cli) -> i32 {
    let logging = LoggingConfig::for_run(cli.verbose, cli.log_format);
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }

    match execute(cli).await {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn execute(cli: Cli) -> CliResult<SweepOutcome> {
    let config = SweepConfig::from_inputs(cli.into_inputs())
        .map_err(|err| CliError::validation(format!("{:#}", anyhow::Error::new(err))))?;
    let deps = CliDependencies::from_config(&config.daemon)?;
    handle_sweep(&config, &deps.client).await
}

#[derive(Debug, Parser)]
#[command(
    name = "seedsweep",
    version,
    about = "Delete entries in a torrent directory that no completed qBittorrent torrent owns"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        env = "SEEDSWEEP_HOSTNAME",
        default_value = DEFAULT_HOSTNAME,
        help = "IP or FQDN of the qBittorrent Web UI"
    )]
    hostname: String,
    #[arg(
        long,
        env = "SEEDSWEEP_PORT",
        default_value_t = DEFAULT_PORT,
        help = "Port of the qBittorrent Web UI"
    )]
    port: u16,
    #[arg(long, env = "SEEDSWEEP_HTTPS", help = "Connect over HTTPS")]
    https: bool,
    #[arg(long, env = "SEEDSWEEP_USERNAME", help = "Web UI username")]
    username: Option<String>,
    #[arg(
        long,
        env = "SEEDSWEEP_PASSWORD",
        hide_env_values = true,
        help = "Web UI password"
    )]
    password: Option<String>,
    #[arg(
        long,
        env = "SEEDSWEEP_DIRECTORY",
        default_value = DEFAULT_DIRECTORY,
        help = "Directory to sweep"
    )]
    directory: PathBuf,
    #[arg(
        long,
        env = "SEEDSWEEP_DAEMON_DIRECTORY",
        help = "The same directory as qBittorrent sees it, when it runs with another mount layout"
    )]
    daemon_directory: Option<PathBuf>,
    #[arg(
        long = "dryrun",
        alias = "dry-run",
        env = "SEEDSWEEP_DRYRUN",
        help = "Report what would be deleted without deleting anything"
    )]
    dry_run: bool,
    #[arg(
        short,
        long,
        env = "SEEDSWEEP_VERBOSE",
        help = "Log per-torrent decisions and list kept entries"
    )]
    verbose: bool,
    #[arg(
        long,
        env = "SEEDSWEEP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "HTTP request timeout in seconds"
    )]
    timeout: u64,
    #[arg(
        long,
        env = "SEEDSWEEP_LOG_FORMAT",
        value_parser = parse_log_format,
        default_value = "pretty",
        help = "Format of diagnostic logs written to stderr (pretty or json)"
    )]
    log_format: LogFormat,
}

impl Cli {
    fn into_inputs(self) -> SweepInputs {
        SweepInputs {
            hostname: self.hostname,
            port: self.port,
            https: self.https,
            username: self.username,
            password: self.password,
            directory: self.directory,
            daemon_directory: self.daemon_directory,
            dry_run: self.dry_run,
            verbose: self.verbose,
            timeout_secs: self.timeout,
        }
    }
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    LogFormat::parse(input).ok_or_else(|| format!("unknown log format '{input}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use seedsweep_test_support::fixtures::{entry_names, populate, scratch_dir};
    use serde_json::json;
    use std::path::Path;

    fn parse(args: &[&str]) -> Result<Cli> {
        let argv = std::iter::once("seedsweep").chain(args.iter().copied());
        Ok(Cli::try_parse_from(argv)?)
    }

    fn cli_for(server: &MockServer, dir: &Path, extra: &[&str]) -> Result<Cli> {
        let port = server.port().to_string();
        let directory = dir.to_string_lossy().into_owned();
        let mut args = vec![
            "--hostname",
            "127.0.0.1",
            "--port",
            port.as_str(),
            "--directory",
            directory.as_str(),
        ];
        args.extend_from_slice(extra);
        parse(&args)
    }

    #[test]
    fn defaults_match_documented_flags() -> Result<()> {
        let inputs = parse(&[])?.into_inputs();
        assert_eq!(inputs.hostname, "127.0.0.1");
        assert_eq!(inputs.port, 8080);
        assert_eq!(inputs.directory, PathBuf::from("/var/torrents/"));
        assert_eq!(inputs.timeout_secs, 10);
        assert!(!inputs.dry_run);
        assert!(inputs.username.is_none());
        Ok(())
    }

    #[test]
    fn dryrun_flag_and_alias() -> Result<()> {
        assert!(parse(&["--dryrun"])?.dry_run);
        assert!(parse(&["--dry-run"])?.dry_run);
        let cli = parse(&["--log-format", "json", "-v"])?;
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(cli.verbose);
        Ok(())
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(parse(&["--log-format", "xml"]).is_err());
    }

    #[tokio::test]
    async fn validation_errors_exit_with_code_two() -> Result<()> {
        let cli = parse(&["--directory", "/"])?;
        let err = execute(cli).await.err().ok_or_else(|| anyhow!("root accepted"))?;
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("filesystem root"));

        let cli = parse(&["--password", "secret"])?;
        assert_eq!(run_with_cli(cli).await, 2);
        Ok(())
    }

    #[tokio::test]
    async fn full_run_against_mock_daemon() -> Result<()> {
        let scratch = scratch_dir()?;
        populate(scratch.path(), &["Kept.Movie/", "orphan.iso", "old-season/"])?;
        let save_path = scratch.path().to_string_lossy().into_owned();
        let server = MockServer::start_async().await;
        let login = server.mock(|when, then| {
            when.method(POST).path("/api/v2/auth/login");
            then.status(200)
                .header("set-cookie", "SID=abc123; HttpOnly; path=/")
                .body("Ok.");
        });
        let list = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v2/torrents/info")
                .query_param("filter", "completed")
                .header("cookie", "SID=abc123");
            then.status(200).json_body(json!([
                {
                    "hash": "abc",
                    "name": "Kept.Movie",
                    "content_path": format!("{save_path}/Kept.Movie"),
                    "save_path": &save_path,
                }
            ]));
        });

        let cli = cli_for(
            &server,
            scratch.path(),
            &["--username", "admin", "--password", "adminadmin"],
        )?;
        assert_eq!(run_with_cli(cli).await, 0);

        login.assert();
        list.assert();
        assert_eq!(entry_names(scratch.path())?, vec!["Kept.Movie"]);
        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_is_fatal_and_deletes_nothing() -> Result<()> {
        let scratch = scratch_dir()?;
        populate(scratch.path(), &["a", "b"])?;
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/v2/auth/login");
            then.status(200).body("Fails.");
        });

        let cli = cli_for(
            &server,
            scratch.path(),
            &["--username", "admin", "--password", "wrong"],
        )?;
        assert_eq!(run_with_cli(cli).await, 3);
        assert_eq!(entry_names(scratch.path())?, vec!["a", "b"]);
        Ok(())
    }

    #[tokio::test]
    async fn dry_run_without_credentials_skips_login() -> Result<()> {
        let scratch = scratch_dir()?;
        populate(scratch.path(), &["a", "b/"])?;
        let server = MockServer::start_async().await;
        let list = server.mock(|when, then| {
            when.method(GET).path("/api/v2/torrents/info");
            then.status(200).json_body(json!([]));
        });

        let cli = cli_for(&server, scratch.path(), &["--dryrun"])?;
        assert_eq!(run_with_cli(cli).await, 0);

        list.assert();
        assert_eq!(entry_names(scratch.path())?, vec!["a", "b"]);
        Ok(())
    }
}
