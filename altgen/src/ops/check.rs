//! Check operation - manifest and registry validation.

use crate::{ops::Project, reports::CheckReport};

/// Execute the check operation.
///
/// Rejected declarations are errors. Generators linked into the binary
/// that nothing declares are warnings.
pub fn check(project: &Project) -> CheckReport {
    let registry = project.engine.registry();
    let settings = project.engine.settings();

    let errors = project
        .discovery
        .rejected
        .iter()
        .map(|rejection| format!("{}: {}", rejection.id, rejection.reason))
        .collect();

    let warnings = project
        .catalog
        .names()
        .filter(|name| !registry.is_generator(name))
        .map(|name| format!("generator {} is never declared", name))
        .collect();

    let mut infos = vec![format!(
        "{} declarations, {} generators",
        registry.len(),
        registry.generators().count()
    )];
    if !settings.auto_emit {
        infos.push("automatic emission is disabled".to_string());
    }
    for path in &settings.disabled_paths {
        infos.push(format!("automatic emission is disabled under {}", path));
    }

    CheckReport {
        config_path: project.config_path.clone(),
        errors,
        warnings,
        infos,
    }
}
