//! Manifest types and parsing for altgen.toml files.

mod file;
mod parse;
mod settings;
mod validate;

use altgen_core::{OutputEncoding, TypeName};
pub use file::AltgenToml;
use serde::Deserialize;
pub use settings::Settings;

/// Root manifest for altgen.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Engine settings
    #[serde(default)]
    pub settings: Settings,

    /// Generator declarations, one per (target, generator) pair
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

/// A generator declared on a target type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declaration {
    /// The type whose source triggers generation
    pub target: TypeName,

    /// The type implementing the generator, defaults to the target itself
    #[serde(default)]
    pub generator: Option<TypeName>,

    /// Whether an existing output file may be replaced
    #[serde(default = "default_overwrite")]
    pub overwrite_if_exists: bool,

    /// Encoding of the generated file
    #[serde(default)]
    pub encoding: OutputEncoding,
}

fn default_overwrite() -> bool {
    true
}

impl Declaration {
    /// The generator type, falling back to the target for self-emitting generators.
    pub fn generator_type(&self) -> &TypeName {
        self.generator.as_ref().unwrap_or(&self.target)
    }

    /// Whether the target generates its own output.
    pub fn is_self_emitting(&self) -> bool {
        self.generator_type() == &self.target
    }
}

impl Manifest {
    /// Iterate declarations referencing the given generator type.
    pub fn declarations_for_generator<'a>(
        &'a self,
        generator: &'a TypeName,
    ) -> impl Iterator<Item = &'a Declaration> {
        self.declarations
            .iter()
            .filter(move |d| d.generator_type() == generator)
    }
}
