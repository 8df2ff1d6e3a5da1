//! Test utilities for hosts and generators.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{cell::Cell, fs, path::Path};

use altgen_core::TypeName;
use indexmap::IndexMap;
use tempfile::TempDir;

use crate::Host;

/// An in-memory host recording every request the engine makes.
#[derive(Debug, Default)]
pub struct RecordingHost {
    types: IndexMap<String, TypeName>,
    lookups: Cell<usize>,
    /// Paths the engine asked to reimport, in order.
    pub reimports: Vec<String>,
    /// Number of global refresh requests.
    pub refreshes: usize,
    /// Reported by [`Host::is_building`].
    pub building: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that the source at `path` declares `ty`.
    pub fn with_type(mut self, path: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        self.types.insert(path.into(), ty.into());
        self
    }

    /// Number of type or path lookups the engine performed.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    /// Take the recorded reimport requests, leaving none behind.
    pub fn take_reimports(&mut self) -> Vec<String> {
        std::mem::take(&mut self.reimports)
    }
}

impl Host for RecordingHost {
    fn resolve_type_for_path(&self, path: &str) -> Option<TypeName> {
        self.lookups.set(self.lookups.get() + 1);
        self.types.get(path).cloned()
    }

    fn resolve_path_for_type(&self, ty: &TypeName) -> Option<String> {
        self.lookups.set(self.lookups.get() + 1);
        self.types
            .iter()
            .find(|(_, t)| *t == ty)
            .map(|(path, _)| path.clone())
    }

    fn request_reimport(&mut self, path: &str) {
        self.reimports.push(path.to_string());
    }

    fn request_global_refresh(&mut self) {
        self.refreshes += 1;
    }

    fn is_building(&self) -> bool {
        self.building
    }
}

/// A temporary project directory.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create an empty project.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a project-relative file, creating directories as needed.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(&self, path: &str, content: &str) -> &Self {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("failed to create directory");
        }
        fs::write(full, content).expect("failed to write file");
        self
    }

    /// Read a project-relative file.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be read.
    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.dir.path().join(path)).expect("failed to read file")
    }

    pub fn exists(&self, path: &str) -> bool {
        self.dir.path().join(path).exists()
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
