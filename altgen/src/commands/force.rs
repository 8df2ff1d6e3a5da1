use clap::Args;
use eyre::Result;

use super::ProjectArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ForceCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Type names (e.g. Sample.Foo) or project-relative paths to regenerate
    #[arg(required = true)]
    pub targets: Vec<String>,
}

impl ForceCommand {
    pub fn run(&self) -> Result<()> {
        let mut project = self.project.load();
        let report = ops::force(&mut project, &self.targets);

        report.render(&mut TerminalOutput::new());
        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}
