//! Generator declarations.

use std::{fmt, sync::Arc};

use altgen_core::{OutputEncoding, OutputName, TypeName};
use serde::Serialize;

use crate::Generator;

/// A declaration as authored, before its generator is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSource {
    pub target: TypeName,
    /// Defaults to the target (self-emitting generator).
    pub generator: Option<TypeName>,
    pub overwrite_if_exists: bool,
    pub encoding: OutputEncoding,
}

impl DeclarationSource {
    /// A self-emitting declaration with default policy.
    pub fn new(target: impl Into<TypeName>) -> Self {
        Self {
            target: target.into(),
            generator: None,
            overwrite_if_exists: true,
            encoding: OutputEncoding::default(),
        }
    }

    /// Delegate generation to another type.
    pub fn generator(mut self, generator: impl Into<TypeName>) -> Self {
        self.generator = Some(generator.into());
        self
    }

    pub fn overwrite_if_exists(mut self, overwrite: bool) -> Self {
        self.overwrite_if_exists = overwrite;
        self
    }

    pub fn encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn generator_type(&self) -> &TypeName {
        self.generator.as_ref().unwrap_or(&self.target)
    }

    /// Identity of the declaration.
    pub fn id(&self) -> DeclarationId {
        DeclarationId::new(self.target.clone(), self.generator_type().clone())
    }
}

impl From<&altgen_manifest::Declaration> for DeclarationSource {
    fn from(decl: &altgen_manifest::Declaration) -> Self {
        Self {
            target: decl.target.clone(),
            generator: decl.generator.clone(),
            overwrite_if_exists: decl.overwrite_if_exists,
            encoding: decl.encoding,
        }
    }
}

/// Identity of a declaration: the (target, generator) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeclarationId {
    pub target: TypeName,
    pub generator: TypeName,
}

impl DeclarationId {
    pub fn new(target: impl Into<TypeName>, generator: impl Into<TypeName>) -> Self {
        Self {
            target: target.into(),
            generator: generator.into(),
        }
    }

    pub fn is_self_emitting(&self) -> bool {
        self.target == self.generator
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_self_emitting() {
            write!(f, "{}", self.target)
        } else {
            write!(f, "{} -> {}", self.target, self.generator)
        }
    }
}

/// A registered declaration with its generator resolved.
///
/// Immutable once registered. The output name is asked from the generator
/// once, at discovery.
#[derive(Clone)]
pub struct GeneratorDeclaration {
    id: DeclarationId,
    overwrite_if_exists: bool,
    encoding: OutputEncoding,
    output_name: OutputName,
    generator: Arc<dyn Generator>,
}

impl GeneratorDeclaration {
    pub(crate) fn new(
        source: &DeclarationSource,
        output_name: OutputName,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            id: source.id(),
            overwrite_if_exists: source.overwrite_if_exists,
            encoding: source.encoding,
            output_name,
            generator,
        }
    }

    pub fn id(&self) -> &DeclarationId {
        &self.id
    }

    pub fn target(&self) -> &TypeName {
        &self.id.target
    }

    pub fn generator_type(&self) -> &TypeName {
        &self.id.generator
    }

    pub fn is_self_emitting(&self) -> bool {
        self.id.is_self_emitting()
    }

    pub fn overwrite_if_exists(&self) -> bool {
        self.overwrite_if_exists
    }

    pub fn encoding(&self) -> OutputEncoding {
        self.encoding
    }

    /// The resolved `<base>.<Target>[.<Generator>].g<ext>` file name.
    pub fn output_name(&self) -> &OutputName {
        &self.output_name
    }

    pub fn generator(&self) -> &dyn Generator {
        self.generator.as_ref()
    }
}

impl fmt::Debug for GeneratorDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorDeclaration")
            .field("id", &self.id)
            .field("overwrite_if_exists", &self.overwrite_if_exists)
            .field("encoding", &self.encoding)
            .field("output_name", &self.output_name.to_string())
            .finish_non_exhaustive()
    }
}
