//! Audit report rendering for sweep runs.
//!
//! Everything here goes to stdout; diagnostics go through `tracing` to stderr.

use std::error::Error;
use std::path::Path;

use seedsweep_fsops::{
    DeletionOutcome, ProtectedSetReport, ReconcileMode, ReconcileReport, RecordAnomaly,
};

pub(crate) fn render_sweep(
    target: &Path,
    protected: &ProtectedSetReport,
    report: &ReconcileReport,
    verbose: bool,
) {
    for line in sweep_lines(target, protected, report, verbose) {
        println!("{line}");
    }
}

pub(crate) fn sweep_lines(
    target: &Path,
    protected: &ProtectedSetReport,
    report: &ReconcileReport,
    verbose: bool,
) -> Vec<String> {
    let mut lines: Vec<String> = protected.anomalies.iter().map(anomaly_line).collect();

    if verbose {
        lines.extend(
            report
                .kept
                .iter()
                .map(|name| format!("Keeping owned entry: {}", target.join(name).display())),
        );
    }

    lines.extend(report.rejected.iter().map(|rejected| {
        format!(
            "ERROR: Suspicious path detected: {} ({})",
            target.join(&rejected.name).display(),
            rejected.violation.as_str()
        )
    }));

    for record in &report.deletions {
        let path = record.candidate.path.display();
        lines.push(match &record.outcome {
            DeletionOutcome::WouldDelete => format!("Dry-run, not deleting: {path}"),
            DeletionOutcome::Deleted => format!("Deleted unowned entry: {path}"),
            DeletionOutcome::Failed(err) => format!("ERROR deleting {path}: {}", error_chain(err)),
        });
    }

    lines.push(String::new());
    lines.push(format!("directory:     {}", target.display()));
    lines.push(format!("mode:          {}", report.mode.as_str()));
    lines.push(format!(
        "torrents:      {} protecting, {} elsewhere, {} skipped",
        protected.classified,
        protected.out_of_scope,
        protected.anomalies.len()
    ));
    lines.push(format!("kept:          {}", report.kept.len()));
    match report.mode {
        ReconcileMode::DryRun => {
            lines.push(format!("would delete:  {}", report.would_delete_count()));
        }
        ReconcileMode::Execute => {
            lines.push(format!("deleted:       {}", report.deleted_count()));
            lines.push(format!("failed:        {}", report.failed_count()));
        }
    }
    lines.push(format!("rejected:      {}", report.rejected.len()));

    if report.mode == ReconcileMode::DryRun && report.would_delete_count() > 0 {
        lines.push(String::new());
        lines.push("Dry-run only; re-run without --dryrun to delete the entries above.".to_string());
    }
    lines
}

fn anomaly_line(anomaly: &RecordAnomaly) -> String {
    format!(
        "Skipped torrent {}: {} (content path {:?}); nothing it owns in the target is protected",
        anomaly.torrent,
        anomaly.error.reason(),
        anomaly.content_path
    )
}

fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
