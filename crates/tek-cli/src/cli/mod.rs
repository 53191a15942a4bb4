use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `tkf` binary.
#[derive(Debug, Parser)]
#[command(
    name = "tkf",
    version,
    about = "Teknofest registration and evaluation from the command line"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Work against the local store instead of the remote API
    #[arg(long, global = true)]
    pub local: bool,

    /// Admin username for admin commands against the local store
    #[arg(long, global = true, value_name = "USERNAME", requires = "local")]
    pub as_admin: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            local: self.local,
            as_admin: self.as_admin.clone(),
        }
    }
}
