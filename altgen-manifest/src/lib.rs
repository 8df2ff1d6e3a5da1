// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Parsing and validation of `altgen.toml`.
//!
//! The manifest carries the engine settings and the table of generator
//! declarations (target type, generator type, overwrite policy, encoding).

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{AltgenToml, Declaration, Manifest, Settings};
