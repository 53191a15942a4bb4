use clap::{Args, Subcommand};

/// Membership commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MemberCommands {
    /// Resolve a membership number through the membership service.
    Verify(MemberVerifyArgs),
}

#[derive(Clone, Debug, Args)]
pub struct MemberVerifyArgs {
    /// Seven-character membership number.
    pub number: String,
}
