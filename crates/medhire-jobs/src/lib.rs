//! # medhire-jobs
//!
//! [`JobsStore`] wraps the recruiter job endpoints. It does not cache jobs;
//! every list or detail view re-fetches. What it does track, through a
//! `tokio::sync::watch` channel, is [`JobsState`]: whether a call is in
//! flight, the message of the last failure, and whether the recruiter has any
//! jobs as of the last successful list or create.
//!
//! Unlike the session store, failures are returned as `Err` after being
//! recorded, so list/detail views can tell "no data yet" from "fetch failed".

mod state;
mod store;

pub use state::JobsState;
pub use store::JobsStore;
