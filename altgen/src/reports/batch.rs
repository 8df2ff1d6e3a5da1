//! Rendering shared by the batch-running commands.

use altgen_engine::{BatchReport, Severity};

use super::output::Output;

/// Render the body of one batch report.
pub(super) fn render_batch(report: &BatchReport, out: &mut dyn Output) {
    for path in &report.written {
        out.added_item(path);
    }
    for path in &report.skipped {
        out.list_item(&format!("{} (exists, kept)", path));
    }
    for path in &report.suppressed {
        out.list_item(&format!("{} (own write)", path));
    }
    for path in &report.deferred {
        out.list_item(&format!("{} (deferred)", path));
    }
    for diagnostic in &report.diagnostics {
        if diagnostic.severity == Severity::Info {
            continue;
        }
        out.warning(&format!("  {}", diagnostic));
    }
}

/// Whether a batch did anything worth a line.
pub(super) fn is_quiet(report: &BatchReport) -> bool {
    report.written.is_empty()
        && report.skipped.is_empty()
        && report.suppressed.is_empty()
        && report.deferred.is_empty()
        && report.diagnostics.iter().all(|d| d.severity == Severity::Info)
}
