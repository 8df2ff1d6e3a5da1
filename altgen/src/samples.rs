//! Built-in sample generators.
//!
//! `Samples.MinimalGenerator` declares itself: drop a `MinimalGenerator.cs`
//! into the project to see it run. `Samples.PanicMethodGenerator` is meant to
//! be declared on a target in `altgen.toml`:
//!
//! ```toml
//! [[declarations]]
//! target = "App.Player"
//! generator = "Samples.PanicMethodGenerator"
//! ```

use std::{fmt::Write, sync::Arc};

use altgen_engine::{
    DECLARATIONS, DeclarationEntry, EmissionContext, GENERATORS, Generator, GeneratorEntry,
};
use eyre::Result;
use linkme::distributed_slice;

pub const MINIMAL: &str = "Samples.MinimalGenerator";
pub const PANIC_METHOD: &str = "Samples.PanicMethodGenerator";

/// Writes a greeting next to its own source.
pub struct MinimalGenerator;

impl Generator for MinimalGenerator {
    fn output_file_name(&self) -> String {
        "Test.cs".to_string()
    }

    fn emit(&self, ctx: &mut EmissionContext, out: &mut String) -> Result<bool> {
        writeln!(out, "Asset Path: {}", ctx.source_path)?;
        writeln!(out, "Hello World from {}", MINIMAL)?;

        // generators may redirect their output
        ctx.output_path.push_str("_MyFirstTest.txt");
        Ok(true)
    }
}

/// Adds a `Panic()` method to a partial class.
///
/// Declines targets outside a namespace.
pub struct PanicMethodGenerator;

impl Generator for PanicMethodGenerator {
    fn output_file_name(&self) -> String {
        "PanicMethod.cs".to_string()
    }

    fn emit(&self, ctx: &mut EmissionContext, out: &mut String) -> Result<bool> {
        let Some(namespace) = ctx.target.namespace() else {
            return Ok(false);
        };

        let name = ctx.target.short_name();
        writeln!(out, "namespace {}", namespace)?;
        writeln!(out, "{{")?;
        writeln!(out, "    internal partial class {}", name)?;
        writeln!(out, "    {{")?;
        writeln!(out, "        public void Panic() => throw new System.Exception();")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
        Ok(true)
    }
}

fn minimal() -> Arc<dyn Generator> {
    Arc::new(MinimalGenerator)
}

fn panic_method() -> Arc<dyn Generator> {
    Arc::new(PanicMethodGenerator)
}

#[distributed_slice(GENERATORS)]
static MINIMAL_GENERATOR: GeneratorEntry = GeneratorEntry::new(MINIMAL, minimal);

#[distributed_slice(GENERATORS)]
static PANIC_METHOD_GENERATOR: GeneratorEntry = GeneratorEntry::new(PANIC_METHOD, panic_method);

#[distributed_slice(DECLARATIONS)]
static MINIMAL_DECLARATION: DeclarationEntry =
    DeclarationEntry::new(MINIMAL).overwrite_if_exists(false);
