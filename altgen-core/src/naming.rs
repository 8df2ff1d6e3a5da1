//! Generated file naming.
//!
//! A generated file is named `<base>.<Target>[.<Generator>].g<ext>`. The
//! generator segment is present only when the generator differs from the
//! target, so one target can carry several generators without collisions.

use std::fmt;

use crate::TypeName;

/// Marker segment placed right before the extension of every generated file.
pub const GENERATED_MARKER: &str = ".g";

const SEGMENT_SEPARATOR: char = '.';

/// File name of a generated artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputName {
    base: String,
    target: String,
    generator: Option<String>,
    extension: String,
}

impl OutputName {
    /// Build the output name from the base name reported by a generator.
    ///
    /// Returns `None` when the requested name is blank.
    pub fn resolve(requested: &str, target: &TypeName, generator: &TypeName) -> Option<Self> {
        let requested = requested.trim();
        // keep the file name only, generated files always live next to the source
        let requested = requested.rsplit(['/', '\\']).next().unwrap_or(requested);
        if requested.is_empty() {
            return None;
        }

        let (base, extension) = match requested.rfind(SEGMENT_SEPARATOR) {
            Some(0) | None => (requested, ""),
            Some(idx) => requested.split_at(idx),
        };

        Some(Self {
            base: base.to_string(),
            target: target.short_name().to_string(),
            generator: (generator != target).then(|| generator.short_name().to_string()),
            extension: extension.to_string(),
        })
    }

    /// The base name without extension.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The extension including its leading dot (empty when there is none).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The generator segment, present only for delegated generators.
    pub fn generator_segment(&self) -> Option<&str> {
        self.generator.as_deref()
    }
}

impl fmt::Display for OutputName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.base, SEGMENT_SEPARATOR, self.target)?;
        if let Some(generator) = &self.generator {
            write!(f, "{}{}", SEGMENT_SEPARATOR, generator)?;
        }
        write!(f, "{}{}", GENERATED_MARKER, self.extension)
    }
}

/// Check whether a file name follows the generated naming convention.
pub fn is_generated_file_name(file_name: &str) -> bool {
    strip_marker(file_name).is_some()
}

/// Extract the short name of the type that produced a generated file.
///
/// For delegated generators this is the generator segment, for self-emitting
/// generators it is the target segment, which is the generator itself.
pub fn generated_owner(file_name: &str) -> Option<&str> {
    let (_, owner) = strip_marker(file_name)?.rsplit_once(SEGMENT_SEPARATOR)?;
    (!owner.is_empty()).then_some(owner)
}

fn strip_marker(file_name: &str) -> Option<&str> {
    if let Some(rest) = file_name.strip_suffix(GENERATED_MARKER) {
        return Some(rest);
    }
    let (head, _) = file_name.rsplit_once(SEGMENT_SEPARATOR)?;
    head.strip_suffix(GENERATED_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(requested: &str, target: &str, generator: &str) -> Option<String> {
        OutputName::resolve(requested, &target.into(), &generator.into()).map(|n| n.to_string())
    }

    #[test]
    fn test_self_emitting_name() {
        assert_eq!(resolve("X.cs", "Foo", "Foo").as_deref(), Some("X.Foo.g.cs"));
        assert_eq!(
            resolve("Enum.cs", "Sample.Scenes", "Sample.Scenes").as_deref(),
            Some("Enum.Scenes.g.cs")
        );
    }

    #[test]
    fn test_delegated_name() {
        assert_eq!(resolve("Y.txt", "Foo", "Bar").as_deref(), Some("Y.Foo.Bar.g.txt"));
        assert_eq!(
            resolve("PanicMethod.cs", "App.Player", "Gen.PanicMethod").as_deref(),
            Some("PanicMethod.Player.PanicMethod.g.cs")
        );
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert_eq!(resolve("", "Foo", "Foo"), None);
        assert_eq!(resolve("   ", "Foo", "Bar"), None);
        assert_eq!(resolve("dir/", "Foo", "Bar"), None);
    }

    #[test]
    fn test_name_without_extension() {
        assert_eq!(resolve("README", "Foo", "Foo").as_deref(), Some("README.Foo.g"));
        assert_eq!(resolve(".env", "Foo", "Foo").as_deref(), Some(".env.Foo.g"));
    }

    #[test]
    fn test_directories_are_dropped() {
        assert_eq!(resolve("sub/dir/X.cs", "Foo", "Foo").as_deref(), Some("X.Foo.g.cs"));
    }

    #[test]
    fn test_generated_owner() {
        assert_eq!(generated_owner("X.Foo.g.cs"), Some("Foo"));
        assert_eq!(generated_owner("Y.Foo.Bar.g.txt"), Some("Bar"));
        assert_eq!(generated_owner("README.Foo.g"), Some("Foo"));
        assert_eq!(generated_owner("Foo.cs"), None);
        assert_eq!(generated_owner("log.g.cs"), None);
        assert_eq!(generated_owner("thing.g"), None);
    }

    #[test]
    fn test_owner_round_trip() {
        let name = OutputName::resolve("Y.txt", &"Foo".into(), &"Bar".into()).unwrap();
        assert_eq!(generated_owner(&name.to_string()), Some("Bar"));
        assert!(is_generated_file_name(&name.to_string()));
        assert!(!is_generated_file_name("Foo.cs"));
    }
}
