use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::JobStatus;
use crate::ids::RecordId;

/// A job posting owned by the signed-in recruiter.
///
/// Older endpoints return `job_title` instead of `title`; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: RecordId,
    #[serde(alias = "job_title")]
    pub title: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub shift: Option<String>,
    #[serde(default)]
    pub pay_min: Option<f64>,
    #[serde(default)]
    pub pay_max: Option<f64>,
    #[serde(default)]
    pub openings: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// `data` payload of `GET /recruiter/jobs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobList {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl JobList {
    /// Whether the recruiter has at least one job according to this page.
    ///
    /// A reported total wins over the page contents, since a filtered or
    /// out-of-range page can be empty while jobs still exist.
    #[must_use]
    pub fn indicates_jobs(&self) -> bool {
        match self.pagination.and_then(|p| p.total) {
            Some(total) => total > 0,
            None => !self.jobs.is_empty(),
        }
    }
}

/// Query parameters for listing jobs. Unset fields are omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Payload for creating a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openings: Option<u32>,
}

/// Partial update payload. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openings: Option<u32>,
}

impl JobPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_legacy_job_title_field() {
        let job: Job = serde_json::from_str(
            r#"{"id": 5, "job_title": "ICU Nurse", "department": "Critical Care", "job_type": "full_time", "status": "OPEN"}"#,
        )
        .unwrap();
        assert_eq!(job.title, "ICU Nurse");
        assert_eq!(job.status, JobStatus::Open);
    }

    #[test]
    fn missing_status_defaults_to_draft() {
        let job: Job = serde_json::from_str(r#"{"id": "j1", "title": "Phlebotomist"}"#).unwrap();
        assert_eq!(job.status, JobStatus::Draft);
        assert!(job.department.is_none());
    }

    #[test]
    fn total_wins_over_empty_page() {
        let list = JobList {
            jobs: Vec::new(),
            pagination: Some(Pagination {
                page: Some(4),
                total: Some(12),
                ..Pagination::default()
            }),
        };
        assert!(list.indicates_jobs());
    }

    #[test]
    fn empty_page_without_total_means_no_jobs() {
        assert!(!JobList::default().indicates_jobs());
    }

    #[test]
    fn filter_omits_unset_fields() {
        let filter = JobFilter {
            status: Some(JobStatus::Open),
            page: Some(2),
            ..JobFilter::default()
        };
        let value = serde_json::to_value(filter).unwrap();
        assert_eq!(value, serde_json::json!({"status": "OPEN", "page": 2}));
    }

    #[test]
    fn patch_serializes_only_changed_fields() {
        let patch = JobPatch {
            status: Some(JobStatus::Paused),
            ..JobPatch::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"status": "PAUSED"})
        );
        assert!(JobPatch::default().is_empty());
    }
}
