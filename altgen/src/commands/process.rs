use std::io::{self, BufRead};

use clap::Args;
use eyre::{Context, Result};

use super::ProjectArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ProcessCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Changed paths, relative to the project root (read from stdin when omitted)
    pub paths: Vec<String>,

    /// Run a single batch instead of following reimports until nothing changes
    #[arg(long)]
    pub once: bool,

    /// Print the batch reports as JSON
    #[arg(long)]
    pub json: bool,
}

impl ProcessCommand {
    pub fn run(&self) -> Result<()> {
        let paths = if self.paths.is_empty() {
            read_paths(io::stdin().lock())?
        } else {
            self.paths.clone()
        };

        let mut project = self.project.load();
        let report = ops::process(&mut project, paths, !self.once);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            report.render(&mut TerminalOutput::new());
        }
        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}

fn read_paths(input: impl BufRead) -> Result<Vec<String>> {
    let mut paths = Vec::new();
    for line in input.lines() {
        let line = line.wrap_err("failed to read paths from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            paths.push(line.to_string());
        }
    }
    Ok(paths)
}
