//! Emission and persistence of a single declaration.

use std::{
    panic::{self, AssertUnwindSafe},
    path::Path,
};

use altgen_core::{Overwrite, WriteResult, normalize, write_file_with};
use altgen_manifest::Settings;
use eyre::{Result, WrapErr, eyre};

use crate::{
    EmissionContext, GeneratorDeclaration, registry::panic_message, resolver::resolve_output_path,
};

/// Result of [`try_emit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    /// The output was written to this project-relative path.
    Written(String),
    /// The generator declined, produced nothing, or left no output path.
    Discarded,
    /// The output exists and the declaration may not overwrite it.
    Exists(String),
}

impl EmitOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, EmitOutcome::Written(_))
    }
}

/// Run a declaration's generator for `source_path` and persist its output.
///
/// The overwrite policy is checked after the generator ran, against the
/// final output path, which the generator may have redirected. A generator
/// error or panic is returned as an error, as is a failed write.
pub fn try_emit(
    root: &Path,
    settings: &Settings,
    declaration: &GeneratorDeclaration,
    source_path: &str,
    force_overwrite: bool,
) -> Result<EmitOutcome> {
    let source_path = normalize(source_path);
    let output_path = resolve_output_path(declaration, &source_path);
    let mut ctx = EmissionContext::new(declaration.target().clone(), source_path, output_path);

    let header = settings
        .render_header(declaration.generator_type())
        .map(|h| format!("{}\n", h))
        .unwrap_or_default();
    let mut buffer = header.clone();

    let persist = panic::catch_unwind(AssertUnwindSafe(|| {
        declaration.generator().emit(&mut ctx, &mut buffer)
    }))
    .map_err(|payload| eyre!("generator panicked: {}", panic_message(payload.as_ref())))?
    .wrap_err_with(|| format!("generator '{}' failed", declaration.generator_type()))?;

    let body = buffer.strip_prefix(header.as_str()).unwrap_or(buffer.as_str());
    if !persist || body.trim().is_empty() {
        return Ok(EmitOutcome::Discarded);
    }
    let output_path = normalize(&ctx.output_path);
    if output_path.is_empty() {
        return Ok(EmitOutcome::Discarded);
    }

    let overwrite = if declaration.overwrite_if_exists() || force_overwrite {
        Overwrite::Always
    } else {
        Overwrite::IfMissing
    };
    let result = write_file_with(
        &root.join(&output_path),
        &buffer,
        declaration.encoding(),
        overwrite,
    )?;

    Ok(match result {
        WriteResult::Written => EmitOutcome::Written(output_path),
        WriteResult::Skipped => EmitOutcome::Exists(output_path),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use altgen_core::OutputEncoding;
    use tempfile::TempDir;

    use super::*;
    use crate::{DeclarationSource, Generator, GeneratorCatalog, Registry, generator_fn};

    fn declaration(source: DeclarationSource, generator: impl Generator + 'static) -> GeneratorDeclaration {
        let catalog = GeneratorCatalog::new().with(source.generator_type().clone(), generator);
        let (registry, _) = Registry::discover(&vec![source], &catalog);
        registry.iter().next().cloned().unwrap()
    }

    fn hello() -> impl Generator {
        generator_fn("X.cs", |ctx, out| {
            out.push_str(&format!("// {}\n", ctx.target));
            Ok(true)
        })
    }

    #[test]
    fn test_writes_next_to_source() {
        let temp = TempDir::new().unwrap();
        let decl = declaration(DeclarationSource::new("Foo"), hello());

        let outcome =
            try_emit(temp.path(), &Settings::default(), &decl, "Assets/Foo.cs", false).unwrap();

        assert_eq!(outcome, EmitOutcome::Written("Assets/altgen.g/X.Foo.g.cs".to_string()));
        let content = fs::read_to_string(temp.path().join("Assets/altgen.g/X.Foo.g.cs")).unwrap();
        assert_eq!(content, "// Foo\n");
    }

    #[test]
    fn test_idempotent_without_overwrite() {
        let temp = TempDir::new().unwrap();
        let decl = declaration(DeclarationSource::new("Foo").overwrite_if_exists(false), hello());
        let settings = Settings::default();
        let path = temp.path().join("altgen.g/X.Foo.g.cs");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "first").unwrap();

        for _ in 0..2 {
            let outcome = try_emit(temp.path(), &settings, &decl, "Foo.cs", false).unwrap();
            assert_eq!(outcome, EmitOutcome::Exists("altgen.g/X.Foo.g.cs".to_string()));
            assert!(!outcome.is_written());
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        let forced = try_emit(temp.path(), &settings, &decl, "Foo.cs", true).unwrap();
        assert!(forced.is_written());
        assert_eq!(fs::read_to_string(&path).unwrap(), "// Foo\n");
    }

    #[test]
    fn test_discarded_outputs() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::default();

        let declined = declaration(
            DeclarationSource::new("Foo"),
            generator_fn("X.cs", |_, out| {
                out.push_str("text");
                Ok(false)
            }),
        );
        let empty = declaration(DeclarationSource::new("Foo"), generator_fn("X.cs", |_, _| Ok(true)));
        let no_path = declaration(
            DeclarationSource::new("Foo"),
            generator_fn("X.cs", |ctx, out| {
                out.push_str("text");
                ctx.output_path = "  ".to_string();
                Ok(true)
            }),
        );

        for decl in [declined, empty, no_path] {
            let outcome = try_emit(temp.path(), &settings, &decl, "Foo.cs", false).unwrap();
            assert_eq!(outcome, EmitOutcome::Discarded);
        }
        assert!(!temp.path().join("altgen.g").exists());
    }

    #[test]
    fn test_header_alone_counts_as_empty() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            header: Some("// <auto-generated>{generator}</auto-generated>".to_string()),
            ..Settings::default()
        };
        let empty = declaration(DeclarationSource::new("Foo"), generator_fn("X.cs", |_, _| Ok(true)));
        assert_eq!(
            try_emit(temp.path(), &settings, &empty, "Foo.cs", false).unwrap(),
            EmitOutcome::Discarded
        );

        let blank = declaration(
            DeclarationSource::new("Foo"),
            generator_fn("X.cs", |_, out| {
                out.push_str("\n  \n");
                Ok(true)
            }),
        );
        assert_eq!(
            try_emit(temp.path(), &settings, &blank, "Foo.cs", false).unwrap(),
            EmitOutcome::Discarded
        );
        assert!(!temp.path().join("altgen.g").exists());

        let decl = declaration(DeclarationSource::new("Foo").generator("Sample.Bar"), hello());
        try_emit(temp.path(), &settings, &decl, "Foo.cs", false).unwrap();
        let content = fs::read_to_string(temp.path().join("altgen.g/X.Foo.Bar.g.cs")).unwrap();
        insta::assert_snapshot!(content, @r"
        // <auto-generated>Bar</auto-generated>
        // Foo
        ");
    }

    #[test]
    fn test_overwrite_gate_uses_redirected_path() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Custom.cs"), "mine").unwrap();
        let decl = declaration(
            DeclarationSource::new("Foo").overwrite_if_exists(false),
            generator_fn("X.cs", |ctx, out| {
                out.push_str("generated");
                ctx.output_path = "Custom.cs".to_string();
                Ok(true)
            }),
        );

        let outcome = try_emit(temp.path(), &Settings::default(), &decl, "Foo.cs", false).unwrap();

        assert_eq!(outcome, EmitOutcome::Exists("Custom.cs".to_string()));
        assert_eq!(fs::read_to_string(temp.path().join("Custom.cs")).unwrap(), "mine");
    }

    #[test]
    fn test_generator_errors_and_panics() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::default();
        let failing = declaration(
            DeclarationSource::new("Foo"),
            generator_fn("X.cs", |_, _| Err(eyre!("boom"))),
        );
        let panicking = declaration(
            DeclarationSource::new("Foo"),
            generator_fn("X.cs", |_, _| panic!("kaboom")),
        );

        let err = try_emit(temp.path(), &settings, &failing, "Foo.cs", false).unwrap_err();
        assert!(format!("{:#}", err).contains("boom"));
        let err = try_emit(temp.path(), &settings, &panicking, "Foo.cs", false).unwrap_err();
        assert!(err.to_string().contains("kaboom"));
    }

    #[test]
    fn test_encoding() {
        let temp = TempDir::new().unwrap();
        let decl = declaration(
            DeclarationSource::new("Foo").encoding(OutputEncoding::Utf16Le),
            generator_fn("X.txt", |_, out| {
                out.push('A');
                Ok(true)
            }),
        );

        try_emit(temp.path(), &Settings::default(), &decl, "Foo.cs", false).unwrap();

        let bytes = fs::read(temp.path().join("altgen.g/X.Foo.g.txt")).unwrap();
        assert_eq!(bytes, vec![0xFF, 0xFE, 0x41, 0x00]);
    }
}
