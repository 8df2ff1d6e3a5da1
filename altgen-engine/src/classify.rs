//! Change classification.
//!
//! Every notified path is sorted into one of four buckets. Generated files
//! are recognized by their name alone, so they are never mistaken for the
//! source of a target.

use altgen_core::{TypeName, file_name, is_generated_file_name};
use altgen_manifest::Settings;
use serde::Serialize;
use tracing::debug;

use crate::{Host, Registry, host::LookupCache};

/// What a changed path means to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum Classification {
    /// Source of a registered target.
    Direct(TypeName),
    /// A generated artifact, naming the generator that produced it.
    Generated(TypeName),
    /// Source of a generator that is not itself a target.
    Generator(TypeName),
    /// Nothing the engine cares about.
    Irrelevant,
}

impl Classification {
    pub fn is_irrelevant(&self) -> bool {
        matches!(self, Classification::Irrelevant)
    }
}

/// Classifies changed paths against a registry.
pub(crate) struct Classifier<'a> {
    pub(crate) registry: &'a Registry,
    pub(crate) settings: &'a Settings,
}

impl Classifier<'_> {
    /// Classify a normalized, project-relative path.
    ///
    /// `forced` lifts the source root and extension filters, which only
    /// apply to automatic generation.
    pub(crate) fn classify(
        &self,
        path: &str,
        host: &dyn Host,
        lookups: &mut LookupCache,
        forced: bool,
    ) -> Classification {
        let name = file_name(path);
        if is_generated_file_name(name) {
            return match self.registry.generator_for_file_name(name) {
                Some(generator) => Classification::Generated(generator.clone()),
                None => {
                    debug!(path, "generated file with no known generator");
                    Classification::Irrelevant
                }
            };
        }

        if !forced && !self.settings.is_source_candidate(path) {
            return Classification::Irrelevant;
        }

        let Some(ty) = lookups.type_for_path(host, path) else {
            return Classification::Irrelevant;
        };
        if self.registry.is_target(&ty) {
            Classification::Direct(ty)
        } else if self.registry.is_generator(&ty) {
            Classification::Generator(ty)
        } else {
            Classification::Irrelevant
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeclarationSource, GeneratorCatalog, generator_fn, testing::RecordingHost};

    fn registry() -> Registry {
        let catalog = GeneratorCatalog::new()
            .with("Foo", generator_fn("X.cs", |_, _| Ok(true)))
            .with("Bar", generator_fn("Y.txt", |_, _| Ok(true)));
        let sources = vec![
            DeclarationSource::new("Foo"),
            DeclarationSource::new("Foo").generator("Bar"),
            DeclarationSource::new("Baz").generator("Bar"),
        ];
        Registry::discover(&sources, &catalog).0
    }

    fn host() -> RecordingHost {
        RecordingHost::new()
            .with_type("Assets/Foo.cs", "Foo")
            .with_type("Assets/Bar.cs", "Bar")
            .with_type("Assets/Other.cs", "Other")
            .with_type("Assets/Foo.txt", "Foo")
    }

    fn classify(settings: &Settings, path: &str, forced: bool) -> Classification {
        let registry = registry();
        let classifier = Classifier {
            registry: &registry,
            settings,
        };
        classifier.classify(path, &host(), &mut LookupCache::default(), forced)
    }

    #[test]
    fn test_direct_generator_irrelevant() {
        let settings = Settings::default();
        assert_eq!(
            classify(&settings, "Assets/Foo.cs", false),
            Classification::Direct("Foo".into())
        );
        assert_eq!(
            classify(&settings, "Assets/Bar.cs", false),
            Classification::Generator("Bar".into())
        );
        assert!(classify(&settings, "Assets/Other.cs", false).is_irrelevant());
        assert!(classify(&settings, "Assets/Unknown.cs", false).is_irrelevant());
    }

    #[test]
    fn test_generated_files_are_never_direct() {
        let settings = Settings::default();
        assert_eq!(
            classify(&settings, "Assets/altgen.g/X.Foo.g.cs", false),
            Classification::Generated("Foo".into())
        );
        assert_eq!(
            classify(&settings, "Assets/altgen.g/Y.Foo.Bar.g.txt", false),
            Classification::Generated("Bar".into())
        );
        assert!(classify(&settings, "Assets/altgen.g/Z.Nope.g.cs", false).is_irrelevant());
    }

    #[test]
    fn test_source_filters_apply_unless_forced() {
        let settings = Settings {
            source_extensions: vec!["cs".to_string()],
            ..Settings::default()
        };
        assert!(classify(&settings, "Assets/Foo.txt", false).is_irrelevant());
        assert_eq!(
            classify(&settings, "Assets/Foo.txt", true),
            Classification::Direct("Foo".into())
        );
    }
}
