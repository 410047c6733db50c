use clap::{Args, Subcommand};
use medhire_core::{JobDraft, JobFilter, JobPatch, JobStatus};

/// Job posting commands.
#[derive(Clone, Debug, Subcommand)]
pub enum JobsCommands {
    /// List jobs, one page at a time.
    List(JobsListArgs),
    /// Show a single job.
    Get { id: String },
    /// Create a job.
    Create(JobsCreateArgs),
    /// Change fields on an existing job.
    Update(JobsUpdateArgs),
    /// Delete a job.
    Delete { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct JobsListArgs {
    #[arg(long, value_parser = parse_status)]
    pub status: Option<JobStatus>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub offset: Option<u32>,
}

impl From<&JobsListArgs> for JobFilter {
    fn from(args: &JobsListArgs) -> Self {
        Self {
            status: args.status,
            page: args.page,
            limit: args.limit,
            offset: args.offset,
        }
    }
}

/// Fields shared by create and update.
#[derive(Clone, Debug, Default, Args)]
pub struct JobFieldArgs {
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub job_type: Option<String>,
    #[arg(long, value_parser = parse_status)]
    pub status: Option<JobStatus>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub shift: Option<String>,
    #[arg(long)]
    pub pay_min: Option<f64>,
    #[arg(long)]
    pub pay_max: Option<f64>,
    #[arg(long)]
    pub openings: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct JobsCreateArgs {
    #[arg(long)]
    pub title: String,
    #[command(flatten)]
    pub fields: JobFieldArgs,
}

impl From<JobsCreateArgs> for JobDraft {
    fn from(args: JobsCreateArgs) -> Self {
        let f = args.fields;
        Self {
            title: args.title,
            department: f.department,
            job_type: f.job_type,
            status: f.status.unwrap_or_default(),
            location: f.location,
            description: f.description,
            shift: f.shift,
            pay_min: f.pay_min,
            pay_max: f.pay_max,
            openings: f.openings,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct JobsUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[command(flatten)]
    pub fields: JobFieldArgs,
}

impl JobsUpdateArgs {
    /// Split into the job id and the fields to change.
    #[must_use]
    pub fn into_patch(self) -> (String, JobPatch) {
        let f = self.fields;
        let patch = JobPatch {
            title: self.title,
            department: f.department,
            job_type: f.job_type,
            status: f.status,
            location: f.location,
            description: f.description,
            shift: f.shift,
            pay_min: f.pay_min,
            pay_max: f.pay_max,
            openings: f.openings,
        };
        (self.id, patch)
    }
}

fn parse_status(value: &str) -> Result<JobStatus, String> {
    value.parse().map_err(|e: medhire_core::CoreError| e.to_string())
}
