use anyhow::Context;
use medhire_session::{DocumentUpload, ProfileRefresh, ProfileUpdate};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ProfileCommands, ProfileUpdateArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `medhire profile <subcommand>`.
pub async fn handle(
    action: ProfileCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProfileCommands::Show => show(ctx, flags).await,
        ProfileCommands::Update(args) => update(args, ctx, flags).await,
    }
}

async fn show(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match ctx.session.load_profile().await {
        ProfileRefresh::Loaded => {}
        ProfileRefresh::Unauthorized => {
            anyhow::bail!("profile show: not signed in. Run 'medhire auth login <email|phone>'")
        }
        ProfileRefresh::ClearedDueToError => {
            anyhow::bail!("profile show: could not load profile")
        }
        ProfileRefresh::SessionExpired => {
            anyhow::bail!("profile show: session expired, sign in again")
        }
    }

    let account = ctx
        .session
        .snapshot()
        .account
        .context("profile show: profile missing after load")?;
    output(&account, flags.format)
}

async fn update(args: ProfileUpdateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let documents = args
        .documents
        .iter()
        .map(|doc| DocumentUpload::from_path(doc.document_type.clone(), &doc.path))
        .collect::<Result<Vec<_>, _>>()
        .context("profile update: failed to read document")?;

    let update = ProfileUpdate {
        company_name: args.company_name,
        organization_type: args.organization_type,
        contact_person: args.contact_person,
        documents,
    };
    if update.is_empty() {
        anyhow::bail!("profile update: nothing to update (pass a field flag or --document)");
    }

    let result = ctx.session.update_profile(update).await;
    if !result.ok {
        for error in &result.errors {
            eprintln!("  {}: {}", error.field, error.message);
        }
        anyhow::bail!(
            "profile update: {}",
            result.message.unwrap_or_else(|| "update failed".into())
        );
    }

    let account = result
        .data
        .context("profile update: server returned no profile")?;
    output(&account, flags.format)
}
