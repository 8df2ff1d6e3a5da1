//! Link-time registration of declarations and generators.
//!
//! Crates add entries to the distributed slices with `linkme`; the entries
//! are collected when the final binary is linked, so no runtime scanning is
//! needed.
//!
//! ```ignore
//! use altgen_engine::{DECLARATIONS, DeclarationEntry, GENERATORS, GeneratorEntry};
//! use linkme::distributed_slice;
//!
//! #[distributed_slice(DECLARATIONS)]
//! static PLAYER_PANIC: DeclarationEntry =
//!     DeclarationEntry::new("App.Player").generator("Gen.PanicMethod");
//!
//! #[distributed_slice(GENERATORS)]
//! static PANIC_METHOD: GeneratorEntry = GeneratorEntry::new("Gen.PanicMethod", || {
//!     Arc::new(PanicMethod)
//! });
//! ```

use std::sync::Arc;

use altgen_core::OutputEncoding;
use linkme::distributed_slice;

use crate::{DeclarationProvider, DeclarationSource, Generator};

/// Declarations registered at link time.
#[distributed_slice]
pub static DECLARATIONS: [DeclarationEntry] = [..];

/// Generator implementations registered at link time.
#[distributed_slice]
pub static GENERATORS: [GeneratorEntry] = [..];

/// A statically registered declaration.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationEntry {
    pub target: &'static str,
    pub generator: Option<&'static str>,
    pub overwrite_if_exists: bool,
    pub encoding: OutputEncoding,
}

impl DeclarationEntry {
    pub const fn new(target: &'static str) -> Self {
        Self {
            target,
            generator: None,
            overwrite_if_exists: true,
            encoding: OutputEncoding::Utf8,
        }
    }

    pub const fn generator(mut self, generator: &'static str) -> Self {
        self.generator = Some(generator);
        self
    }

    pub const fn overwrite_if_exists(mut self, overwrite: bool) -> Self {
        self.overwrite_if_exists = overwrite;
        self
    }

    pub const fn encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl From<&DeclarationEntry> for DeclarationSource {
    fn from(entry: &DeclarationEntry) -> Self {
        let source = DeclarationSource::new(entry.target)
            .overwrite_if_exists(entry.overwrite_if_exists)
            .encoding(entry.encoding);
        match entry.generator {
            Some(generator) => source.generator(generator),
            None => source,
        }
    }
}

/// A statically registered generator implementation.
#[derive(Clone, Copy)]
pub struct GeneratorEntry {
    pub name: &'static str,
    pub build: fn() -> Arc<dyn Generator>,
}

impl GeneratorEntry {
    pub const fn new(name: &'static str, build: fn() -> Arc<dyn Generator>) -> Self {
        Self { name, build }
    }
}

/// Provides the declarations of the static [`DECLARATIONS`] table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticProvider;

impl DeclarationProvider for StaticProvider {
    fn declarations(&self) -> Vec<DeclarationSource> {
        DECLARATIONS.iter().map(DeclarationSource::from).collect()
    }
}
