use altgen_core::{TypeName, normalize};
use serde::Deserialize;

/// Engine settings from the `[settings]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Run generators automatically on change notifications
    pub auto_emit: bool,

    /// Path prefixes under which target sources live (empty: anywhere)
    pub source_roots: Vec<String>,

    /// Extensions of target sources, without dot (empty: any)
    pub source_extensions: Vec<String>,

    /// Sources excluded from automatic generation
    pub disabled_paths: Vec<String>,

    /// Header prepended to every generated file, `{generator}` is replaced
    /// by the generator name
    pub header: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_emit: true,
            source_roots: Vec::new(),
            source_extensions: Vec::new(),
            disabled_paths: Vec::new(),
            header: None,
        }
    }
}

impl Settings {
    /// Check whether a project-relative path may hold a target source.
    pub fn is_source_candidate(&self, path: &str) -> bool {
        let in_root = self.source_roots.is_empty()
            || self
                .source_roots
                .iter()
                .any(|root| is_under(path, &normalize(root)));
        if !in_root {
            return false;
        }

        if self.source_extensions.is_empty() {
            return true;
        }
        let file_name = altgen_core::file_name(path);
        match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => self
                .source_extensions
                .iter()
                .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext)),
            _ => false,
        }
    }

    /// Check whether automatic generation is turned off for a source.
    pub fn is_auto_emit_disabled(&self, path: &str) -> bool {
        self.disabled_paths.iter().any(|p| normalize(p) == path)
    }

    /// Render the output header for a generator, if one is configured.
    pub fn render_header(&self, generator: &TypeName) -> Option<String> {
        self.header
            .as_ref()
            .map(|h| h.replace("{generator}", generator.short_name()))
    }
}

/// Whether `path` is `root` or lies below it, matching whole components.
fn is_under(path: &str, root: &str) -> bool {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return true;
    }
    path.strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
