//! List command report data structures.

use altgen_core::TypeName;
use altgen_engine::{DeclarationId, Rejection};
use serde::Serialize;

use super::output::{Output, Report};

/// A registered declaration.
#[derive(Debug, Serialize)]
pub struct DeclarationInfo {
    pub id: DeclarationId,
    pub output_name: String,
    /// The target's source file, if the host can find it.
    pub source: Option<String>,
    pub output_path: Option<String>,
    pub overwrite_if_exists: bool,
    pub encoding: String,
}

/// A generator shared by several targets.
#[derive(Debug, Serialize)]
pub struct EmitterInfo {
    pub generator: TypeName,
    pub targets: usize,
}

#[derive(Debug, Serialize)]
pub struct ListReport {
    pub declarations: Vec<DeclarationInfo>,
    pub emitters: Vec<EmitterInfo>,
    pub rejected: Vec<Rejection>,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        out.section("Declarations");
        for declaration in &self.declarations {
            out.list_item(&declaration.id.to_string());
            out.key_value_indented("output", &declaration.output_name);
            match (&declaration.source, &declaration.output_path) {
                (Some(source), Some(output)) => {
                    out.key_value_indented("source", source);
                    out.key_value_indented("path", output);
                }
                _ => out.key_value_indented("source", "(not found)"),
            }
            if !declaration.overwrite_if_exists {
                out.key_value_indented("overwrite", "never");
            }
        }

        if !self.emitters.is_empty() {
            out.newline();
            out.section("Shared generators");
            for emitter in &self.emitters {
                out.list_item(&format!("{} ({} targets)", emitter.generator, emitter.targets));
            }
        }

        if !self.rejected.is_empty() {
            out.newline();
            out.section("Rejected");
            for rejection in &self.rejected {
                out.warning(&format!("  {}: {}", rejection.id, rejection.reason));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use altgen_engine::RejectReason;

    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render() {
        let report = ListReport {
            declarations: vec![
                DeclarationInfo {
                    id: DeclarationId::new("App.Player", "Gen.Panic"),
                    output_name: "Panic.Player.Panic.g.cs".to_string(),
                    source: Some("Assets/Player.cs".to_string()),
                    output_path: Some("Assets/altgen.g/Panic.Player.Panic.g.cs".to_string()),
                    overwrite_if_exists: true,
                    encoding: "utf-8".to_string(),
                },
                DeclarationInfo {
                    id: DeclarationId::new("Gen.Minimal", "Gen.Minimal"),
                    output_name: "Test.Minimal.g.cs".to_string(),
                    source: None,
                    output_path: None,
                    overwrite_if_exists: false,
                    encoding: "utf-8".to_string(),
                },
            ],
            emitters: vec![EmitterInfo {
                generator: "Gen.Panic".into(),
                targets: 2,
            }],
            rejected: vec![Rejection {
                id: DeclarationId::new("App.Boss", "Gen.Missing"),
                reason: RejectReason::MissingGenerator,
            }],
        };

        insta::assert_snapshot!(BufferOutput::render(&report), @r"
        Declarations:
          - App.Player -> Gen.Panic
            output: Panic.Player.Panic.g.cs
            source: Assets/Player.cs
            path: Assets/altgen.g/Panic.Player.Panic.g.cs
          - Gen.Minimal
            output: Test.Minimal.g.cs
            source: (not found)
            overwrite: never

        Shared generators:
          - Gen.Panic (2 targets)

        Rejected:
          App.Boss -> Gen.Missing: no generator implementation registered
        ");
    }
}
