//! Report data structures for commands.
//!
//! Operations build reports, then commands render them to an Output target
//! or serialize them as JSON.

mod batch;
mod check;
mod force;
mod list;
mod output;
mod process;

pub use check::CheckReport;
pub use force::{ForceReport, ForceRun};
pub use list::{DeclarationInfo, EmitterInfo, ListReport};
pub use output::{Report, TerminalOutput};
pub use process::ProcessReport;
