//! Batch plugin hooks.

use std::fmt;

use eyre::Result;
use serde::Serialize;

use crate::BatchReport;

/// The phases of a batch, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPhase {
    /// Consume suppressions and apply the automatic generation filters.
    Collecting,
    /// Classify paths and build the work sets.
    ResolvingTargets,
    /// Run the declarations of directly changed targets.
    RunningDirect,
    /// Run or defer cascaded declarations.
    RunningCascaded,
    /// Register suppressions and ask the host to reimport.
    RequestingReimport,
    Done,
}

impl BatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchPhase::Collecting => "collecting",
            BatchPhase::ResolvingTargets => "resolving_targets",
            BatchPhase::RunningDirect => "running_direct",
            BatchPhase::RunningCascaded => "running_cascaded",
            BatchPhase::RequestingReimport => "requesting_reimport",
            BatchPhase::Done => "done",
        }
    }
}

impl fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plugin observing the engine's batches.
///
/// Plugins receive callbacks before and after each phase of every batch.
/// An error returned by a hook is recorded in the batch report; it never
/// stops the batch.
///
/// # Example
///
/// ```ignore
/// struct Timing {
///     started: Mutex<Option<Instant>>,
/// }
///
/// impl Plugin for Timing {
///     fn name(&self) -> &'static str { "timing" }
///
///     fn on_before_phase(&self, phase: BatchPhase, _report: &mut BatchReport) -> Result<()> {
///         if phase == BatchPhase::Collecting {
///             *self.started.lock().unwrap() = Some(Instant::now());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a phase runs.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: BatchPhase, report: &mut BatchReport) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: BatchPhase, report: &mut BatchReport) -> Result<()> {
        Ok(())
    }
}
