//! Entity structs as returned by the recruiter API.

mod job;
mod recruiter;

pub use job::{Job, JobDraft, JobFilter, JobList, JobPatch, Pagination};
pub use recruiter::{RecruiterAccount, RecruiterDocument, RecruiterProfile};
