//! Output path resolution.

use altgen_core::output_path;

use crate::GeneratorDeclaration;

/// Project-relative path of a declaration's output for a given source.
///
/// The file lands in the generated directory next to the source, named
/// after the declaration's cached output name.
pub fn resolve_output_path(declaration: &GeneratorDeclaration, source_path: &str) -> String {
    output_path(source_path, &declaration.output_name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeclarationSource, GeneratorCatalog, Registry, generator_fn};

    #[test]
    fn test_fan_out_never_collides() {
        let catalog = GeneratorCatalog::new()
            .with("Foo", generator_fn("X.cs", |_, _| Ok(true)))
            .with("Bar", generator_fn("X.cs", |_, _| Ok(true)))
            .with("Qux", generator_fn("X.cs", |_, _| Ok(true)));
        let sources = vec![
            DeclarationSource::new("Foo"),
            DeclarationSource::new("Foo").generator("Bar"),
            DeclarationSource::new("Foo").generator("Qux"),
        ];
        let (registry, _) = Registry::discover(&sources, &catalog);

        let paths: Vec<_> = registry
            .iter()
            .map(|d| resolve_output_path(d, "Assets/Scripts/Foo.cs"))
            .collect();

        assert_eq!(
            paths,
            vec![
                "Assets/Scripts/altgen.g/X.Foo.g.cs",
                "Assets/Scripts/altgen.g/X.Foo.Bar.g.cs",
                "Assets/Scripts/altgen.g/X.Foo.Qux.g.cs",
            ]
        );
    }
}
