//! List operation - registry contents.

use altgen_engine::{Host, resolver::resolve_output_path};

use crate::{
    ops::Project,
    reports::{DeclarationInfo, EmitterInfo, ListReport},
};

/// Execute the list operation.
pub fn list(project: &Project) -> ListReport {
    let registry = project.engine.registry();

    let declarations = registry
        .iter()
        .map(|declaration| {
            let source = project.host.resolve_path_for_type(declaration.target());
            DeclarationInfo {
                id: declaration.id().clone(),
                output_name: declaration.output_name().to_string(),
                output_path: source
                    .as_deref()
                    .map(|source| resolve_output_path(declaration, source)),
                source,
                overwrite_if_exists: declaration.overwrite_if_exists(),
                encoding: declaration.encoding().to_string(),
            }
        })
        .collect();

    let emitters = registry
        .emitters()
        .map(|(generator, targets)| EmitterInfo {
            generator: generator.clone(),
            targets,
        })
        .collect();

    ListReport {
        declarations,
        emitters,
        rejected: project.discovery.rejected.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::fixtures::*;

    #[test]
    fn test_list() {
        let (_temp, project) = project(SHARED, &["Assets/Player.cs"]);

        let report = list(&project);

        assert_eq!(report.declarations.len(), 3);
        let player = &report.declarations[0];
        assert_eq!(player.source.as_deref(), Some("Assets/Player.cs"));
        assert_eq!(
            player.output_path.as_deref(),
            Some("Assets/altgen.g/PanicMethod.Player.PanicMethodGenerator.g.cs")
        );
        assert_eq!(report.declarations[1].output_path, None);
        assert_eq!(report.emitters.len(), 1);
        assert_eq!(report.emitters[0].targets, 2);
    }
}
