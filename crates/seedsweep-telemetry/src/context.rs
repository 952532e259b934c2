//! Span helpers for a sweep run.

use tracing::Span;

/// Span that groups every event of one sweep under a run identifier.
#[must_use]
pub fn sweep_span(run_id: &str, mode: &str) -> Span {
    tracing::info_span!("sweep", run_id = %run_id, mode = %mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_span_is_constructible_without_subscriber() {
        let span = sweep_span("run-1", "dry_run");
        let _entered = span.enter();
    }
}
