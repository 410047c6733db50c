//! # medhire-session
//!
//! Client-side recruiter session for the medhire API.
//!
//! [`SessionStore`] owns the OTP login flow (send → verify), the resulting
//! session, and the recruiter profile/document snapshot. Its state is
//! published through a `tokio::sync::watch` channel so any number of views
//! can subscribe and re-render on change.
//!
//! Two strategies share one implementation, selected by
//! [`SessionSettings::persist_token`]:
//! - cookie-centric (default): the backend's session cookie is the only
//!   credential; nothing is cached or written to disk
//! - token-centric: the backend token plus profile snapshot are persisted
//!   through a [`SessionStorage`] and restored by [`SessionStore::rehydrate`]
//!
//! Every public action reports its outcome as a value; none of them return
//! `Err` to the caller.

pub mod error;
pub mod phone;
pub mod profile;
pub mod state;
pub mod storage;
mod store;

pub use error::SessionError;
pub use profile::{DocumentUpload, ProfileUpdate};
pub use state::{ActiveSession, SessionPhase, SessionState};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageKey};
pub use store::{ProfileRefresh, Rehydration, SessionSettings, SessionStore};
