use medhire_core::{JobDraft, JobFilter};

use crate::cli::GlobalFlags;
use crate::cli::OutputFormat;
use crate::cli::subcommands::JobsCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `medhire jobs <subcommand>`.
pub async fn handle(action: JobsCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        JobsCommands::List(args) => {
            let envelope = ctx.jobs.get_jobs(JobFilter::from(&args)).await?;
            let list = envelope.data.unwrap_or_default();
            // Tables show the rows; structured formats keep pagination.
            if flags.format == OutputFormat::Table {
                output(&list.jobs, flags.format)
            } else {
                output(&list, flags.format)
            }
        }
        JobsCommands::Get { id } => {
            let envelope = ctx.jobs.get_job(&id).await?;
            output(&envelope.data, flags.format)
        }
        JobsCommands::Create(args) => {
            let envelope = ctx.jobs.create_job(&JobDraft::from(args)).await?;
            output(&envelope.data, flags.format)
        }
        JobsCommands::Update(args) => {
            let (id, patch) = args.into_patch();
            let envelope = ctx.jobs.update_job(&id, &patch).await?;
            output(&envelope.data, flags.format)
        }
        JobsCommands::Delete { id } => {
            let envelope = ctx.jobs.delete_job(&id).await?;
            output(&envelope, flags.format)
        }
    }
}
