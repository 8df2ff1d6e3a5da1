//! Project-relative path helpers.
//!
//! Paths exchanged with the host are project-relative and always use `/`
//! as separator, whatever the platform.

/// Directory holding generated artifacts, placed next to each source file.
pub const GENERATED_DIR: &str = "altgen.g";

/// Normalize a project-relative path (`\` to `/`, no leading `./`).
pub fn normalize(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    let mut path = path.as_str();
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path.to_string()
}

/// The last component of a path.
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// The last component of a path without its extension.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Check whether a path lives directly inside a generated artifacts directory.
pub fn is_in_generated_dir(path: &str) -> bool {
    let dir = parent_dir(path);
    dir == GENERATED_DIR || dir.ends_with(&format!("/{}", GENERATED_DIR))
}

/// Output path for a generated file belonging to `source_path`.
///
/// Sources that already live in the generated directory do not get it
/// appended a second time.
pub fn output_path(source_path: &str, file_name: &str) -> String {
    let source_path = normalize(source_path);
    let dir = parent_dir(&source_path);
    let mut out = String::with_capacity(dir.len() + GENERATED_DIR.len() + file_name.len() + 2);
    if !dir.is_empty() {
        out.push_str(dir);
        out.push('/');
    }
    if !is_in_generated_dir(&source_path) {
        out.push_str(GENERATED_DIR);
        out.push('/');
    }
    out.push_str(file_name);
    out
}
