use clap::{Parser, Subcommand};

pub mod global;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};

use subcommands::{AuthCommands, JobsCommands, ProfileCommands};

/// Top-level CLI parser for the `medhire` binary.
#[derive(Debug, Parser)]
#[command(name = "medhire", version, about = "medhire - recruiter console")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in with a one-time passcode, check, or end the session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Recruiter organization profile and compliance documents.
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Job postings.
    Jobs {
        #[command(subcommand)]
        action: JobsCommands,
    },
}
