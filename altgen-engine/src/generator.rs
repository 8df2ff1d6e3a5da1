//! The generator contract.

use altgen_core::TypeName;
use eyre::Result;

/// Per-invocation context handed to [`Generator::emit`].
///
/// A fresh context is built for every emit call and dropped once the write
/// decision is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmissionContext {
    /// The type whose source triggered generation.
    pub target: TypeName,
    /// Project-relative, normalized path of the target's source.
    pub source_path: String,
    /// Where the output will be written. Generators may redirect it.
    pub output_path: String,
}

impl EmissionContext {
    pub fn new(
        target: TypeName,
        source_path: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Self {
        Self {
            target,
            source_path: source_path.into(),
            output_path: output_path.into(),
        }
    }
}

/// A source generator.
///
/// # Example
///
/// ```ignore
/// struct Greeting;
///
/// impl Generator for Greeting {
///     fn output_file_name(&self) -> String {
///         "Greeting.cs".to_string()
///     }
///
///     fn emit(&self, ctx: &mut EmissionContext, out: &mut String) -> Result<bool> {
///         out.push_str(&format!("// hello from {}\n", ctx.target));
///         Ok(true)
///     }
/// }
/// ```
pub trait Generator: Send + Sync {
    /// Base name of the generated file, e.g. `Enum.cs`.
    ///
    /// Called once per declaration at discovery and cached.
    fn output_file_name(&self) -> String;

    /// Append the generated text to `out`.
    ///
    /// Returns whether the buffer should be persisted.
    fn emit(&self, ctx: &mut EmissionContext, out: &mut String) -> Result<bool>;
}

/// A generator built from a file name and a closure.
pub struct FnGenerator<F> {
    file_name: String,
    emit: F,
}

impl<F> Generator for FnGenerator<F>
where
    F: Fn(&mut EmissionContext, &mut String) -> Result<bool> + Send + Sync,
{
    fn output_file_name(&self) -> String {
        self.file_name.clone()
    }

    fn emit(&self, ctx: &mut EmissionContext, out: &mut String) -> Result<bool> {
        (self.emit)(ctx, out)
    }
}

/// Create a generator from a closure.
pub fn generator_fn<F>(file_name: impl Into<String>, emit: F) -> FnGenerator<F>
where
    F: Fn(&mut EmissionContext, &mut String) -> Result<bool> + Send + Sync,
{
    FnGenerator {
        file_name: file_name.into(),
        emit,
    }
}
