//! Process command report data structures.

use altgen_engine::BatchReport;
use serde::Serialize;

use super::{
    batch::{is_quiet, render_batch},
    output::{Output, Report},
};

/// The batches run for a set of changed paths.
#[derive(Debug, Serialize)]
pub struct ProcessReport {
    pub batches: Vec<BatchReport>,
    /// Reimports requested by the last batch that were not followed.
    pub pending: Vec<String>,
}

impl ProcessReport {
    pub fn has_errors(&self) -> bool {
        self.batches.iter().any(|b| b.has_errors())
    }

    /// Paths written across every batch.
    pub fn written(&self) -> impl Iterator<Item = &str> {
        self.batches
            .iter()
            .flat_map(|b| b.written.iter().map(String::as_str))
    }
}

impl Report for ProcessReport {
    fn render(&self, out: &mut dyn Output) {
        for (index, batch) in self.batches.iter().enumerate() {
            if is_quiet(batch) {
                continue;
            }
            out.section(&format!("batch {}", index + 1));
            render_batch(batch, out);
        }

        if !self.pending.is_empty() {
            out.section("pending reimports");
            for path in &self.pending {
                out.list_item(path);
            }
        }

        let written = self.written().count();
        if written == 0 {
            out.preformatted("nothing written");
        } else {
            out.preformatted(&format!(
                "wrote {} file(s) in {} batch(es)",
                written,
                self.batches.len()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use altgen_engine::{BatchPhase, Diagnostic};

    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render() {
        let report = ProcessReport {
            batches: vec![
                BatchReport {
                    written: vec!["Assets/altgen.g/A.Player.G.g.cs".to_string()],
                    deferred: vec!["Assets/Enemy.cs".to_string()],
                    diagnostics: vec![
                        Diagnostic::error(BatchPhase::RunningDirect, "generator 'G' failed")
                            .at("App.Boss -> G"),
                    ],
                    ..Default::default()
                },
                BatchReport {
                    suppressed: vec!["Assets/altgen.g/A.Player.G.g.cs".to_string()],
                    ..Default::default()
                },
                BatchReport::default(),
            ],
            pending: Vec::new(),
        };

        insta::assert_snapshot!(BufferOutput::render(&report), @r"
        batch 1:
          + Assets/altgen.g/A.Player.G.g.cs
          - Assets/Enemy.cs (deferred)
          error: generator 'G' failed (at App.Boss -> G)
        batch 2:
          - Assets/altgen.g/A.Player.G.g.cs (own write)
        wrote 1 file(s) in 3 batch(es)
        ");
        assert!(report.has_errors());
    }

    #[test]
    fn test_render_nothing() {
        let report = ProcessReport {
            batches: vec![BatchReport::default()],
            pending: vec!["Assets/Foo.cs".to_string()],
        };

        insta::assert_snapshot!(BufferOutput::render(&report), @r"
        pending reimports:
          - Assets/Foo.cs
        nothing written
        ");
    }
}
