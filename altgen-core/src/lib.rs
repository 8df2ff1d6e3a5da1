//! Core utilities and types for the altgen source generator.
//!
//! This crate provides the fundamental types shared by the manifest,
//! the engine and the command-line front end.

mod encoding;
mod file;
mod naming;
mod paths;
mod types;

// File operations
pub use encoding::OutputEncoding;
pub use file::{Overwrite, WriteResult, write_file, write_file_with};
// Generated file naming
pub use naming::{GENERATED_MARKER, OutputName, generated_owner, is_generated_file_name};
// Project-relative paths
pub use paths::{GENERATED_DIR, file_name, file_stem, is_in_generated_dir, normalize, output_path};
pub use types::TypeName;
