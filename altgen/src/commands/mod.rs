mod check;
mod completions;
mod force;
mod list;
mod process;

use std::path::PathBuf;

use altgen_manifest::AltgenToml;
use check::CheckCommand;
use clap::{ArgAction, Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use force::ForceCommand;
use list::ListCommand;
use process::ProcessCommand;

use crate::ops::Project;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for altgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Options shared by every command working on a project.
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to altgen.toml (defaults to ./altgen.toml)
    #[arg(short, long, default_value = "altgen.toml")]
    pub config: PathBuf,
}

impl ProjectArgs {
    /// Open the manifest and discover its declarations.
    pub fn load(&self) -> Project {
        let toml = AltgenToml::open(&self.config).unwrap_or_exit();
        Project::load(toml)
    }
}

#[derive(Parser)]
#[command(name = "altgen")]
#[command(version)]
#[command(about = "Regenerate source files when the sources they derive from change")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Process(cmd) => cmd.run(),
            Commands::Force(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run generators for changed files
    Process(ProcessCommand),

    /// Regenerate targets ignoring overwrite policies
    Force(ForceCommand),

    /// List declarations, emitters and output files
    List(ListCommand),

    /// Validate altgen.toml and report rejected declarations
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
