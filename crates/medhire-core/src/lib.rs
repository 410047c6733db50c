//! # medhire-core
//!
//! Domain types shared by every medhire crate:
//! - Recruiter profile, document, and job entities as the backend returns them
//! - OTP credential and target-type detection
//! - The backend response envelope and field-level validation errors
//! - The non-throwing `ActionResult` shape returned by the session store
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod envelope;
pub mod errors;
pub mod ids;
pub mod otp;

pub use entities::{
    Job, JobDraft, JobFilter, JobList, JobPatch, Pagination, RecruiterAccount, RecruiterDocument,
    RecruiterProfile,
};
pub use enums::{JobStatus, TargetType};
pub use envelope::{ActionResult, Envelope, FieldError};
pub use errors::CoreError;
pub use ids::RecordId;
pub use otp::OtpCredential;
