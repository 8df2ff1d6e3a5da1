//! Sources of declarations.

use altgen_manifest::Manifest;

use crate::DeclarationSource;

/// Supplies the declarations known to the process.
///
/// Providers are asked again on every discovery, so they must return the
/// full current set each time.
pub trait DeclarationProvider {
    fn declarations(&self) -> Vec<DeclarationSource>;
}

impl DeclarationProvider for Vec<DeclarationSource> {
    fn declarations(&self) -> Vec<DeclarationSource> {
        self.clone()
    }
}

impl DeclarationProvider for [DeclarationSource] {
    fn declarations(&self) -> Vec<DeclarationSource> {
        self.to_vec()
    }
}

impl<P: DeclarationProvider + ?Sized> DeclarationProvider for &P {
    fn declarations(&self) -> Vec<DeclarationSource> {
        (**self).declarations()
    }
}

/// Chain two providers, declarations of the first come first.
impl<A: DeclarationProvider, B: DeclarationProvider> DeclarationProvider for (A, B) {
    fn declarations(&self) -> Vec<DeclarationSource> {
        let mut declarations = self.0.declarations();
        declarations.extend(self.1.declarations());
        declarations
    }
}

/// Declarations from the `[[declarations]]` table of `altgen.toml`.
#[derive(Debug, Clone, Copy)]
pub struct ManifestProvider<'a> {
    manifest: &'a Manifest,
}

impl<'a> ManifestProvider<'a> {
    pub fn new(manifest: &'a Manifest) -> Self {
        Self { manifest }
    }
}

impl DeclarationProvider for ManifestProvider<'_> {
    fn declarations(&self) -> Vec<DeclarationSource> {
        self.manifest
            .declarations
            .iter()
            .map(DeclarationSource::from)
            .collect()
    }
}
