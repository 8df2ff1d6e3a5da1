//! Generator registry.
//!
//! Discovery turns the declarations of a [`DeclarationProvider`] into
//! [`GeneratorDeclaration`]s, resolving every generator type against a
//! [`GeneratorCatalog`]. Discovery is total: a bad declaration is rejected
//! and reported, never fatal to the others.

use std::panic::{self, AssertUnwindSafe};

use altgen_core::{OutputName, TypeName, generated_owner};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    DeclarationId, DeclarationProvider, DeclarationSource, GeneratorCatalog, GeneratorDeclaration,
};

/// Why a declaration was not registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum RejectReason {
    /// No implementation registered for the generator type.
    MissingGenerator,
    /// The generator reported a blank output file name.
    BlankOutputName,
    /// Asking the generator for its output file name panicked.
    OutputNameFailed(String),
    /// The same (target, generator) pair was declared more than once.
    Duplicate,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::MissingGenerator => write!(f, "no generator implementation registered"),
            RejectReason::BlankOutputName => write!(f, "output file name is blank"),
            RejectReason::OutputNameFailed(msg) => write!(f, "output file name failed: {}", msg),
            RejectReason::Duplicate => write!(f, "declared more than once"),
        }
    }
}

/// A rejected declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub id: DeclarationId,
    #[serde(flatten)]
    pub reason: RejectReason,
}

/// Outcome of a discovery pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryReport {
    pub accepted: Vec<DeclarationId>,
    pub rejected: Vec<Rejection>,
}

impl DiscoveryReport {
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Registered declarations, indexed by target and by generator.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    declarations: IndexMap<DeclarationId, GeneratorDeclaration>,
    by_target: IndexMap<TypeName, Vec<DeclarationId>>,
    by_generator: IndexMap<TypeName, Vec<DeclarationId>>,
}

impl Registry {
    /// Build a registry from every declaration of `provider`.
    pub fn discover(
        provider: &dyn DeclarationProvider,
        catalog: &GeneratorCatalog,
    ) -> (Self, DiscoveryReport) {
        let mut registry = Registry::default();
        let mut report = DiscoveryReport::default();

        for source in provider.declarations() {
            let id = source.id();
            match registry.resolve(&source, catalog) {
                Ok(declaration) => {
                    debug!(declaration = %id, output = %declaration.output_name(), "registered");
                    registry.insert(declaration);
                    report.accepted.push(id);
                }
                Err(reason) => {
                    warn!(declaration = %id, %reason, "rejected declaration");
                    report.rejected.push(Rejection { id, reason });
                }
            }
        }

        (registry, report)
    }

    fn resolve(
        &self,
        source: &DeclarationSource,
        catalog: &GeneratorCatalog,
    ) -> Result<GeneratorDeclaration, RejectReason> {
        if self.declarations.contains_key(&source.id()) {
            return Err(RejectReason::Duplicate);
        }
        let generator = catalog
            .get(source.generator_type())
            .ok_or(RejectReason::MissingGenerator)?;

        let requested = panic::catch_unwind(AssertUnwindSafe(|| generator.output_file_name()))
            .map_err(|payload| RejectReason::OutputNameFailed(panic_message(payload.as_ref())))?;
        let output_name = OutputName::resolve(&requested, &source.target, source.generator_type())
            .ok_or(RejectReason::BlankOutputName)?;

        Ok(GeneratorDeclaration::new(
            source,
            output_name,
            generator.clone(),
        ))
    }

    fn insert(&mut self, declaration: GeneratorDeclaration) {
        let id = declaration.id().clone();
        self.by_target
            .entry(id.target.clone())
            .or_default()
            .push(id.clone());
        self.by_generator
            .entry(id.generator.clone())
            .or_default()
            .push(id.clone());
        self.declarations.insert(id, declaration);
    }

    pub fn get(&self, id: &DeclarationId) -> Option<&GeneratorDeclaration> {
        self.declarations.get(id)
    }

    /// All declarations, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &GeneratorDeclaration> {
        self.declarations.values()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Declarations carried by a target.
    pub fn for_target<'a>(
        &'a self,
        target: &TypeName,
    ) -> impl Iterator<Item = &'a GeneratorDeclaration> + use<'a> {
        self.lookup(self.by_target.get(target))
    }

    /// Declarations using a generator.
    pub fn for_generator<'a>(
        &'a self,
        generator: &TypeName,
    ) -> impl Iterator<Item = &'a GeneratorDeclaration> + use<'a> {
        self.lookup(self.by_generator.get(generator))
    }

    fn lookup<'a>(
        &'a self,
        ids: Option<&'a Vec<DeclarationId>>,
    ) -> impl Iterator<Item = &'a GeneratorDeclaration> + 'a {
        ids.into_iter()
            .flatten()
            .filter_map(|id| self.declarations.get(id))
    }

    pub fn is_target(&self, ty: &TypeName) -> bool {
        self.by_target.contains_key(ty)
    }

    pub fn is_generator(&self, ty: &TypeName) -> bool {
        self.by_generator.contains_key(ty)
    }

    /// Target types, in discovery order.
    pub fn targets(&self) -> impl Iterator<Item = &TypeName> {
        self.by_target.keys()
    }

    /// Generator types, in discovery order.
    pub fn generators(&self) -> impl Iterator<Item = &TypeName> {
        self.by_generator.keys()
    }

    /// Generators referenced by more than one target.
    pub fn emitters(&self) -> impl Iterator<Item = (&TypeName, usize)> {
        self.by_generator
            .iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(generator, ids)| (generator, ids.len()))
    }

    /// The generator that produced a generated file.
    ///
    /// Exact output names are matched first. Otherwise the owner segment of
    /// the name is matched against generator short names, which covers
    /// generators that redirected their output.
    pub fn generator_for_file_name(&self, file_name: &str) -> Option<&TypeName> {
        if let Some(declaration) = self
            .iter()
            .find(|d| d.output_name().to_string() == file_name)
        {
            return Some(declaration.generator_type());
        }

        let owner = generated_owner(file_name)?;
        let mut matches = self.generators().filter(|g| g.short_name() == owner);
        let generator = matches.next()?;
        if matches.next().is_some() {
            debug!(file_name, %generator, "ambiguous generator short name, using the first");
        }
        Some(generator)
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
