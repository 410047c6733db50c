use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = match command {
        Commands::Auth { action } => commands::auth::handle(action, ctx, flags).await,
        Commands::Profile { action } => commands::profile::handle(action, ctx, flags).await,
        Commands::Jobs { action } => commands::jobs::handle(action, ctx, flags).await,
    };

    ctx.persist_cookies()?;
    result
}
