//! Force operation - regenerate ignoring overwrite policies.

use std::path::Path;

use altgen_core::TypeName;

use crate::{
    ops::Project,
    reports::{ForceReport, ForceRun},
};

/// Execute the force operation.
///
/// Each argument is either a project-relative path or a type name.
pub fn force(project: &mut Project, targets: &[String]) -> ForceReport {
    let runs = targets
        .iter()
        .map(|target| {
            let report = if is_path(project.engine.root(), target) {
                project
                    .engine
                    .force_generate_paths(&mut project.host, [target])
            } else {
                project
                    .engine
                    .force_generate_report(&mut project.host, &TypeName::new(target.as_str()))
            };
            // forced runs cascade immediately, so only own outputs are reimported
            let reimports = project.host.take_reimports();
            if !reimports.is_empty() {
                project.engine.on_files_changed(&mut project.host, &reimports);
            }
            ForceRun {
                target: target.clone(),
                report,
            }
        })
        .collect();

    ForceReport { runs }
}

fn is_path(root: &Path, target: &str) -> bool {
    target.contains(['/', '\\']) || root.join(target).is_file()
}
