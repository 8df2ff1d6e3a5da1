//! Core operations.
//!
//! This module contains the business logic for altgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod force;
pub mod list;
pub mod process;

use std::path::PathBuf;

use altgen_engine::{DiscoveryReport, Engine, GeneratorCatalog, ManifestProvider, StaticProvider};
use altgen_manifest::AltgenToml;
pub use check::check;
pub use force::force;
pub use list::list;
pub use process::process;

use crate::host::FsHost;

/// A loaded project: its engine, with declarations discovered, and its host.
pub struct Project {
    pub config_path: PathBuf,
    pub engine: Engine,
    pub host: FsHost,
    pub catalog: GeneratorCatalog,
    pub discovery: DiscoveryReport,
}

impl Project {
    /// Load a project with the generators linked into this binary.
    pub fn load(toml: AltgenToml) -> Self {
        Self::with_catalog(toml, GeneratorCatalog::from_static())
    }

    /// Load a project with the given generators.
    pub fn with_catalog(toml: AltgenToml, catalog: GeneratorCatalog) -> Self {
        let root = toml.project_root().to_path_buf();
        let manifest = toml.manifest();

        let mut engine = Engine::new(&root, manifest.settings.clone());
        let provider = (ManifestProvider::new(manifest), StaticProvider);
        let discovery = engine.discover(&provider, &catalog);
        let host = FsHost::new(&root, engine.registry());

        Self {
            config_path: toml.path().to_path_buf(),
            engine,
            host,
            catalog,
            discovery,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_load_discovers_manifest_and_static_declarations() {
        let (_temp, project) = project(SHARED, &[]);

        assert!(!project.discovery.has_rejections());
        // two from the manifest, the minimal sample from the static table
        assert_eq!(project.engine.registry().len(), 3);
        assert!(project.catalog.contains(&"Samples.PanicMethodGenerator".into()));
    }
}
