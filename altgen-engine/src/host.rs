//! The host the engine runs inside.

use std::collections::HashMap;

use altgen_core::TypeName;

/// Services the engine consumes from its host.
///
/// Paths are project-relative and use `/` as separator.
pub trait Host {
    /// The type declared by a source file, if any.
    fn resolve_type_for_path(&self, path: &str) -> Option<TypeName>;

    /// The source file declaring a type, if any.
    fn resolve_path_for_type(&self, ty: &TypeName) -> Option<String>;

    /// Ask the host to process a file again.
    fn request_reimport(&mut self, path: &str);

    /// Ask the host to refresh its index.
    fn request_global_refresh(&mut self);

    /// Whether the host is in the middle of a build.
    ///
    /// Reimport and refresh requests are not sent while building.
    fn is_building(&self) -> bool {
        false
    }
}

/// Memoizes host lookups for the duration of a batch.
#[derive(Debug, Default)]
pub(crate) struct LookupCache {
    types: HashMap<String, Option<TypeName>>,
    paths: HashMap<TypeName, Option<String>>,
}

impl LookupCache {
    pub(crate) fn type_for_path(&mut self, host: &dyn Host, path: &str) -> Option<TypeName> {
        self.types
            .entry(path.to_string())
            .or_insert_with(|| host.resolve_type_for_path(path))
            .clone()
    }

    pub(crate) fn path_for_type(&mut self, host: &dyn Host, ty: &TypeName) -> Option<String> {
        self.paths
            .entry(ty.clone())
            .or_insert_with(|| {
                host.resolve_path_for_type(ty)
                    .map(|p| altgen_core::normalize(&p))
            })
            .clone()
    }
}
