//! Orchestration engine for the altgen source generator.
//!
//! The engine reacts to change notifications from a host (an IDE, a file
//! watcher, the `altgen` command line), decides which generators have to run,
//! invokes them and writes their output next to the source that triggered
//! them, without letting its own writes trigger another round of generation.
//!
//! # Module Organization
//!
//! - [`generator`] - The generator contract (`output_file_name` + `emit`)
//! - [`catalog`] - Generator implementations by type name
//! - [`declaration`] - Declarations binding a target to a generator
//! - [`provider`] - Where declarations come from (manifest, static table, code)
//! - [`registry`] - Discovery and bidirectional lookup of declarations
//! - [`classify`] - Change classification of notified paths
//! - [`writer`] - Emission and persistence of a single declaration
//! - [`scheduler`] - The batch state machine ([`Engine`])
//! - [`testing`] - Test utilities (feature-gated)

pub mod catalog;
pub mod classify;
pub mod declaration;
pub mod generator;
pub mod host;
pub mod plugin;
pub mod provider;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod scheduler;
pub mod static_table;
pub mod writer;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use catalog::GeneratorCatalog;
pub use classify::Classification;
pub use declaration::{DeclarationId, DeclarationSource, GeneratorDeclaration};
pub use generator::{EmissionContext, FnGenerator, Generator, generator_fn};
pub use host::Host;
pub use plugin::{BatchPhase, Plugin};
pub use provider::{DeclarationProvider, ManifestProvider};
pub use registry::{DiscoveryReport, RejectReason, Rejection, Registry};
pub use report::{BatchReport, Diagnostic, Severity};
pub use scheduler::Engine;
pub use static_table::{DECLARATIONS, DeclarationEntry, GENERATORS, GeneratorEntry, StaticProvider};
pub use writer::EmitOutcome;
