use std::{borrow::Borrow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Opaque identity of a type taking part in generation.
///
/// Names are dotted (`Sample.Foo`) or path-like (`sample::Foo`). Only the
/// last segment is used when building file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last segment of the name (e.g. `Foo` for `Sample.Foo`).
    pub fn short_name(&self) -> &str {
        let name = self.0.rsplit("::").next().unwrap_or(&self.0);
        name.rsplit('.').next().unwrap_or(name)
    }

    /// Everything before the short name, without the trailing separator.
    pub fn namespace(&self) -> Option<&str> {
        let short = self.short_name();
        let head = &self.0[..self.0.len() - short.len()];
        let head = head
            .strip_suffix("::")
            .or_else(|| head.strip_suffix('.'))?;
        (!head.is_empty()).then_some(head)
    }

    /// Check that every segment is an identifier.
    ///
    /// Returns the reason the name is invalid, if any.
    pub fn validate(&self) -> Option<String> {
        if self.0.trim().is_empty() {
            return Some("type name cannot be empty".to_string());
        }
        for segment in self.0.split("::").flat_map(|s| s.split('.')) {
            let mut chars = segment.chars();
            match chars.next() {
                None => return Some(format!("'{}' contains an empty segment", self.0)),
                Some(c) if !(c.is_alphabetic() || c == '_') => {
                    return Some(format!(
                        "segment '{}' must start with a letter or underscore",
                        segment
                    ));
                }
                _ => {}
            }
            if let Some(c) = chars.find(|c| !(c.is_alphanumeric() || *c == '_')) {
                return Some(format!("segment '{}' contains invalid character '{}'", segment, c));
            }
        }
        None
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TypeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = Self::new(s);
        match name.validate() {
            Some(reason) => Err(reason),
            None => Ok(name),
        }
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
