//! Force command report data structures.

use altgen_engine::BatchReport;
use serde::Serialize;

use super::{
    batch::render_batch,
    output::{Output, Report},
};

/// One forced regeneration.
#[derive(Debug, Serialize)]
pub struct ForceRun {
    /// The type name or path as given.
    pub target: String,
    pub report: BatchReport,
}

#[derive(Debug, Serialize)]
pub struct ForceReport {
    pub runs: Vec<ForceRun>,
}

impl ForceReport {
    pub fn has_errors(&self) -> bool {
        self.runs.iter().any(|r| r.report.has_errors())
    }
}

impl Report for ForceReport {
    fn render(&self, out: &mut dyn Output) {
        for run in &self.runs {
            out.section(&run.target);
            render_batch(&run.report, out);
            if !run.report.wrote_any() {
                out.list_item("nothing written");
            }
        }
    }
}
