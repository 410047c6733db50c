use clap::{Args, Subcommand};
use medhire_core::TargetType;

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Send a one-time passcode and verify it.
    Login(AuthLoginArgs),
    /// End the session here and on the server.
    Logout,
    /// Show current auth status.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Email address or phone number to send the code to.
    pub target: String,
    /// Force the channel instead of inferring it from the target.
    #[arg(long = "type", value_parser = parse_target_type)]
    pub target_type: Option<TargetType>,
    /// Dialing code for phone targets (defaults to session.default_country_code).
    #[arg(long)]
    pub country_code: Option<String>,
    /// Verification code; prompted for when omitted.
    #[arg(long)]
    pub code: Option<String>,
    /// Skip loading the profile after signing in.
    #[arg(long)]
    pub no_profile: bool,
}

fn parse_target_type(value: &str) -> Result<TargetType, String> {
    value.parse().map_err(|e: medhire_core::CoreError| e.to_string())
}
