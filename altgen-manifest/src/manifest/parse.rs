//! Manifest parsing from files and strings.

use std::{collections::HashMap, path::Path, str::FromStr};

use altgen_core::TypeName;

use super::{Manifest, validate::find_value_spans};
use crate::{Error, Result, SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "altgen.toml")
    }
}

impl Manifest {
    /// Parse an altgen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse an altgen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    validate_manifest(&manifest, &ctx)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    if let Some(header) = &manifest.settings.header
        && header.trim().is_empty()
    {
        return Err(ctx.validation_error(
            "header cannot be blank, remove it to disable headers",
            find_value_spans(ctx.src(), header).first().copied(),
        ));
    }

    let mut seen: HashMap<(&TypeName, &TypeName), usize> = HashMap::new();
    for decl in &manifest.declarations {
        validate_type_name(ctx, &decl.target, "target")?;
        if let Some(generator) = &decl.generator {
            validate_type_name(ctx, generator, "generator")?;
        }

        let key = (&decl.target, decl.generator_type());
        let count = seen.entry(key).or_default();
        *count += 1;
        if *count > 1 {
            let spans = find_value_spans(ctx.src(), decl.target.as_str());
            return Err(match (spans.first(), spans.get(*count - 1)) {
                (Some(first), Some(second)) => ctx.duplicate_declaration_error(
                    decl.target.as_str(),
                    decl.generator_type().as_str(),
                    *first,
                    *second,
                ),
                _ => ctx.validation_error(
                    format!(
                        "duplicate declaration of generator '{}' on '{}'",
                        decl.generator_type(),
                        decl.target
                    ),
                    None,
                ),
            });
        }
    }
    Ok(())
}

fn validate_type_name(ctx: &SourceContext, name: &TypeName, field: &'static str) -> Result<()> {
    match name.validate() {
        Some(reason) => Err(ctx.invalid_type_name_error(
            name.as_str(),
            field,
            reason,
            find_value_spans(ctx.src(), name.as_str()).first().copied(),
        )),
        None => Ok(()),
    }
}
