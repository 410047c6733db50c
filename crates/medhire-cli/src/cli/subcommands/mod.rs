pub mod auth;
pub mod jobs;
pub mod profile;

pub use auth::{AuthCommands, AuthLoginArgs};
pub use jobs::{JobsCommands, JobsCreateArgs, JobsListArgs, JobsUpdateArgs};
pub use profile::{DocumentArg, ProfileCommands, ProfileUpdateArgs};
