//! Process operation - run notification batches.

use crate::{ops::Project, reports::ProcessReport};

/// Upper bound on batches when following reimports.
pub const MAX_BATCHES: usize = 16;

/// Execute the process operation.
///
/// With `settle`, the reimports requested by a batch are fed back as the
/// next batch until none are left, which absorbs the engine's own writes
/// and runs deferred cascades.
pub fn process(project: &mut Project, paths: Vec<String>, settle: bool) -> ProcessReport {
    let mut batches = Vec::new();
    let mut pending = paths;

    loop {
        let report = project.engine.on_files_changed(&mut project.host, &pending);
        batches.push(report);
        pending = project.host.take_reimports();
        if !settle || pending.is_empty() || batches.len() >= MAX_BATCHES {
            break;
        }
    }

    ProcessReport { batches, pending }
}

#[cfg(test)]
mod tests {
    use altgen_engine::DeclarationId;

    use super::*;
    use crate::ops::fixtures::*;

    const PLAYER_OUT: &str = "Assets/altgen.g/PanicMethod.Player.PanicMethodGenerator.g.cs";
    const ENEMY_OUT: &str = "Assets/altgen.g/PanicMethod.Enemy.PanicMethodGenerator.g.cs";

    #[test]
    fn test_settles_deferred_cascade() {
        let (temp, mut project) = project(SHARED, &["Assets/Player.cs", "Assets/Enemy.cs"]);

        let report = process(&mut project, vec!["Assets/Player.cs".to_string()], true);

        assert_eq!(report.batches.len(), 3);
        assert_eq!(report.batches[0].written, vec![PLAYER_OUT]);
        assert_eq!(report.batches[0].deferred, vec!["Assets/Enemy.cs"]);
        assert_eq!(
            report.batches[1].ran,
            vec![DeclarationId::new("App.Enemy", "Samples.PanicMethodGenerator")]
        );
        assert_eq!(report.batches[1].suppressed, vec![PLAYER_OUT]);
        assert_eq!(report.batches[2].suppressed, vec![ENEMY_OUT]);
        assert!(report.pending.is_empty());
        assert!(temp.path().join(ENEMY_OUT).exists());
    }

    #[test]
    fn test_single_batch_leaves_reimports_pending() {
        let (_temp, mut project) = project(SHARED, &["Assets/Player.cs", "Assets/Enemy.cs"]);

        let report = process(&mut project, vec!["Assets/Player.cs".to_string()], false);

        assert_eq!(report.batches.len(), 1);
        assert_eq!(report.pending, vec![PLAYER_OUT, "Assets/Enemy.cs"]);
    }

    #[test]
    fn test_minimal_sample_redirects_output() {
        let (temp, mut project) = project(SHARED, &["Assets/MinimalGenerator.cs"]);

        let report = process(&mut project, vec!["Assets/MinimalGenerator.cs".to_string()], true);

        let out = "Assets/altgen.g/Test.MinimalGenerator.g.cs_MyFirstTest.txt";
        assert_eq!(report.batches[0].written, vec![out]);
        assert!(temp.path().join(out).exists());
    }
}
