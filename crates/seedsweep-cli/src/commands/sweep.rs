//! One sweep pass: list completed torrents, protect what they own, delete the rest.

use anyhow::Context;
use seedsweep_config::SweepConfig;
use seedsweep_fsops::{Reconciler, build_protected_set};
use seedsweep_telemetry::sweep_span;
use seedsweep_torrent_core::TorrentLister;
use tracing::{Instrument, info};
use uuid::Uuid;

use crate::client::{CliError, CliResult};
use crate::output::render_sweep;

/// How a completed pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SweepOutcome {
    /// Every candidate was handled.
    Clean,
    /// The pass finished but some entries failed or were refused.
    PartialFailure,
}

impl SweepOutcome {
    pub(crate) const fn exit_code(self) -> i32 {
        match self {
            Self::Clean => 0,
            Self::PartialFailure => 4,
        }
    }
}

/// Run one pass against `lister`.
///
/// The torrent listing completes before the target directory is read, so a
/// daemon failure never leads to a deletion.
pub(crate) async fn handle_sweep(
    config: &SweepConfig,
    lister: &dyn TorrentLister,
) -> CliResult<SweepOutcome> {
    let run_id = Uuid::new_v4().to_string();
    let span = sweep_span(&run_id, config.mode.as_str());

    sweep_pass(config, lister).instrument(span).await
}

async fn sweep_pass(config: &SweepConfig, lister: &dyn TorrentLister) -> CliResult<SweepOutcome> {
    info!(
        directory = %config.target.local().display(),
        daemon_directory = %config.target.daemon_view().display(),
        "sweep started"
    );

    let records = lister
        .list_completed()
        .await
        .context("failed to list completed torrents")
        .map_err(CliError::failure)?;
    info!(torrents = records.len(), "completed torrents listed");

    let protected = build_protected_set(&records, &config.target);
    let report = Reconciler::new(&config.target, config.mode)
        .run(&protected.set)
        .context("failed to reconcile target directory")
        .map_err(CliError::failure)?;

    render_sweep(config.target.local(), &protected, &report, config.verbose);

    info!(
        kept = report.kept.len(),
        deleted = report.deleted_count(),
        would_delete = report.would_delete_count(),
        failed = report.failed_count(),
        rejected = report.rejected.len(),
        "sweep finished"
    );

    Ok(if report.has_failures() {
        SweepOutcome::PartialFailure
    } else {
        SweepOutcome::Clean
    })
}
