//! Generator implementations keyed by type name.

use std::sync::Arc;

use altgen_core::TypeName;
use indexmap::IndexMap;

use crate::{GENERATORS, Generator};

/// Maps generator type names to their implementation.
///
/// A declaration naming a generator type with no catalog entry is rejected
/// at discovery.
#[derive(Default, Clone)]
pub struct GeneratorCatalog {
    generators: IndexMap<TypeName, Arc<dyn Generator>>,
}

impl GeneratorCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding every generator of the static [`GENERATORS`] table.
    pub fn from_static() -> Self {
        Self::new().with_static()
    }

    /// Add every generator of the static [`GENERATORS`] table.
    pub fn with_static(mut self) -> Self {
        for entry in GENERATORS.iter() {
            self.register_arc(entry.name, (entry.build)());
        }
        self
    }

    /// Register a generator, replacing any previous one with the same name.
    pub fn register(&mut self, name: impl Into<TypeName>, generator: impl Generator + 'static) {
        self.register_arc(name, Arc::new(generator));
    }

    /// Register an already shared generator.
    pub fn register_arc(&mut self, name: impl Into<TypeName>, generator: Arc<dyn Generator>) {
        self.generators.insert(name.into(), generator);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, name: impl Into<TypeName>, generator: impl Generator + 'static) -> Self {
        self.register(name, generator);
        self
    }

    pub fn get(&self, name: &TypeName) -> Option<&Arc<dyn Generator>> {
        self.generators.get(name)
    }

    pub fn contains(&self, name: &TypeName) -> bool {
        self.generators.contains_key(name)
    }

    /// Registered generator names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &TypeName> {
        self.generators.keys()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl std::fmt::Debug for GeneratorCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.generators.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator_fn;

    #[test]
    fn test_register_and_replace() {
        let mut catalog = GeneratorCatalog::new();
        catalog.register("Foo", generator_fn("A.cs", |_, _| Ok(true)));
        catalog.register("Bar", generator_fn("B.cs", |_, _| Ok(true)));
        catalog.register("Foo", generator_fn("C.cs", |_, _| Ok(true)));

        assert_eq!(catalog.len(), 2);
        let foo = catalog.get(&"Foo".into()).unwrap();
        assert_eq!(foo.output_file_name(), "C.cs");
        let names: Vec<_> = catalog.names().map(TypeName::as_str).collect();
        assert_eq!(names, vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_missing_generator() {
        let catalog = GeneratorCatalog::new();
        assert!(catalog.is_empty());
        assert!(!catalog.contains(&"Foo".into()));
    }
}
