pub mod auth;
pub mod dispatch;
pub mod jobs;
pub mod profile;
