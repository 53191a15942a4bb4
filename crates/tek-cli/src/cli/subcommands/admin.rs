use clap::{Args, Subcommand};

/// Admin commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AdminCommands {
    /// Log in and store the bearer token.
    Login(AdminLoginArgs),
    /// Clear the stored token.
    Logout,
    /// Show the stored token's owner and expiry.
    Status,
    /// Create an admin account with the registration code.
    Register(AdminRegisterArgs),
    /// Create an admin in the local store.
    Create(AdminCreateArgs),
    /// List admins and their weights.
    List,
    /// Change an admin's evaluation weight (superadmin).
    Weight(AdminWeightArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AdminLoginArgs {
    #[arg(long)]
    pub username: String,
    /// Falls back to TEKNOFEST_ADMIN_PASSWORD.
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AdminRegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub full_name: String,
    /// Falls back to TEKNOFEST_ADMIN_PASSWORD.
    #[arg(long)]
    pub password: Option<String>,
    /// Overrides `api.registration_code`.
    #[arg(long)]
    pub code: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AdminCreateArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub full_name: String,
    /// Evaluation weight (0-100); defaults to `general.default_admin_weight`.
    #[arg(long)]
    pub weight: Option<u8>,
    #[arg(long)]
    pub superadmin: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AdminWeightArgs {
    pub admin_id: i64,
    pub weight: u8,
}
