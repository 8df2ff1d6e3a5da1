//! A host backed by the project directory.
//!
//! Types are matched to sources by file stem: `Assets/Player.cs` declares
//! every known type whose short name is `Player`.

use std::{
    cell::OnceCell,
    collections::HashMap,
    path::{Path, PathBuf},
};

use altgen_core::{GENERATED_DIR, TypeName, file_stem, is_generated_file_name, normalize};
use altgen_engine::{Host, Registry};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

pub struct FsHost {
    root: PathBuf,
    /// Known types by short name.
    types: HashMap<String, TypeName>,
    /// Source paths by file stem, built on first lookup.
    sources: OnceCell<HashMap<String, String>>,
    reimports: Vec<String>,
}

impl FsHost {
    /// Create a host knowing every target and generator of `registry`.
    pub fn new(root: impl Into<PathBuf>, registry: &Registry) -> Self {
        let mut types = HashMap::new();
        for ty in registry.targets().chain(registry.generators()) {
            types
                .entry(ty.short_name().to_string())
                .or_insert_with(|| ty.clone());
        }
        Self {
            root: root.into(),
            types,
            sources: OnceCell::new(),
            reimports: Vec::new(),
        }
    }

    /// Take the reimport requests made so far.
    pub fn take_reimports(&mut self) -> Vec<String> {
        std::mem::take(&mut self.reimports)
    }

    fn sources(&self) -> &HashMap<String, String> {
        self.sources.get_or_init(|| scan_sources(&self.root))
    }
}

impl Host for FsHost {
    fn resolve_type_for_path(&self, path: &str) -> Option<TypeName> {
        self.types.get(file_stem(path)).cloned()
    }

    fn resolve_path_for_type(&self, ty: &TypeName) -> Option<String> {
        self.sources().get(ty.short_name()).cloned()
    }

    fn request_reimport(&mut self, path: &str) {
        info!(path, "reimport requested");
        self.reimports.push(path.to_string());
    }

    fn request_global_refresh(&mut self) {
        debug!("refresh requested");
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == GENERATED_DIR || name == "target" || name == "node_modules"
}

/// Index source files by stem. The first file found for a stem wins.
fn scan_sources(root: &Path) -> HashMap<String, String> {
    let mut sources = HashMap::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e));

    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = normalize(&relative.to_string_lossy());
        if is_generated_file_name(altgen_core::file_name(&relative)) {
            continue;
        }
        sources
            .entry(file_stem(&relative).to_string())
            .or_insert(relative);
    }
    debug!(count = sources.len(), "indexed source files");
    sources
}

#[cfg(test)]
mod tests {
    use std::fs;

    use altgen_engine::{DeclarationSource, GeneratorCatalog, generator_fn};
    use tempfile::TempDir;

    use super::*;

    fn registry() -> Registry {
        let catalog = GeneratorCatalog::new()
            .with("Gen.Panic", generator_fn("P.cs", |_, _| Ok(true)));
        let sources = vec![DeclarationSource::new("App.Player").generator("Gen.Panic")];
        Registry::discover(&sources, &catalog).0
    }

    fn write(root: &Path, path: &str) {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, "").unwrap();
    }

    #[test]
    fn test_resolve_type_by_stem() {
        let host = FsHost::new("/nowhere", &registry());

        assert_eq!(
            host.resolve_type_for_path("Assets/Player.cs"),
            Some("App.Player".into())
        );
        assert_eq!(
            host.resolve_type_for_path("Editor/Panic.cs"),
            Some("Gen.Panic".into())
        );
        assert_eq!(host.resolve_type_for_path("Assets/Enemy.cs"), None);
    }

    #[test]
    fn test_resolve_path_skips_generated_and_hidden() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".git/Player.cs");
        write(temp.path(), "Assets/altgen.g/Player.cs");
        write(temp.path(), "Assets/P.Player.Panic.g.cs");
        write(temp.path(), "Assets/Scripts/Player.cs");

        let host = FsHost::new(temp.path(), &registry());

        assert_eq!(
            host.resolve_path_for_type(&"App.Player".into()).as_deref(),
            Some("Assets/Scripts/Player.cs")
        );
        assert_eq!(host.resolve_path_for_type(&"Gen.Panic".into()), None);
    }

    #[test]
    fn test_reimports_are_recorded() {
        let mut host = FsHost::new("/nowhere", &registry());
        host.request_reimport("Assets/altgen.g/P.Player.Panic.g.cs");
        host.request_global_refresh();

        assert_eq!(
            host.take_reimports(),
            vec!["Assets/altgen.g/P.Player.Panic.g.cs"]
        );
        assert!(host.take_reimports().is_empty());
        assert!(!host.is_building());
    }
}
