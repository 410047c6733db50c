use std::future::Future;

use medhire_client::{ApiError, ApiRequest, Transport, endpoints, open_envelope};
use medhire_core::{Envelope, Job, JobDraft, JobFilter, JobList, JobPatch};
use serde_json::Value;
use tokio::sync::watch;

use crate::state::JobsState;

const LIST_FALLBACK: &str = "Failed to fetch jobs";
const GET_FALLBACK: &str = "Failed to fetch job";
const CREATE_FALLBACK: &str = "Failed to create job";
const UPDATE_FALLBACK: &str = "Failed to update job";
const DELETE_FALLBACK: &str = "Failed to delete job";

/// Clears `is_loading` when the call finishes, including when the caller
/// drops the future mid-flight.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<JobsState>,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a watch::Sender<JobsState>) -> Self {
        state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.is_loading = false);
    }
}

pub struct JobsStore<T: Transport> {
    transport: T,
    state: watch::Sender<JobsState>,
}

impl<T: Transport> JobsStore<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: watch::Sender::new(JobsState::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<JobsState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> JobsState {
        self.state.borrow().clone()
    }

    pub fn has_jobs(&self) -> bool {
        self.state.borrow().has_jobs
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// List one page of the recruiter's jobs and refresh `has_jobs` from it.
    ///
    /// # Errors
    ///
    /// Returns the transport, status, or envelope failure after recording its
    /// message in [`JobsState::error`].
    pub async fn get_jobs(&self, filter: JobFilter) -> Result<Envelope<JobList>, ApiError> {
        let envelope = self
            .track("list", async {
                let query = serde_json::to_value(filter)
                    .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
                let body = self
                    .transport
                    .send(endpoints::JOBS, ApiRequest::get().with_query(query))
                    .await?;
                open_envelope::<JobList>(body, LIST_FALLBACK)
            })
            .await?;

        let has_jobs = envelope.data.as_ref().is_some_and(JobList::indicates_jobs);
        self.state.send_modify(|s| s.has_jobs = has_jobs);
        tracing::debug!(has_jobs, "job list loaded");
        Ok(envelope)
    }

    /// Fetch a single job.
    ///
    /// # Errors
    ///
    /// Returns the failure after recording its message.
    pub async fn get_job(&self, id: &str) -> Result<Envelope<Job>, ApiError> {
        self.track("get", async {
            let body = self
                .transport
                .send(&endpoints::job(id), ApiRequest::get())
                .await?;
            open_envelope(body, GET_FALLBACK)
        })
        .await
    }

    /// Create a job. Success means the recruiter now has at least one.
    ///
    /// # Errors
    ///
    /// Returns the failure after recording its message.
    pub async fn create_job(&self, draft: &JobDraft) -> Result<Envelope<Job>, ApiError> {
        let envelope = self
            .track("create", async {
                if draft.title.trim().is_empty() {
                    return Err(ApiError::InvalidRequest("job title is required".into()));
                }
                let payload = serde_json::to_value(draft)
                    .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
                let body = self
                    .transport
                    .send(endpoints::JOBS, ApiRequest::post_json(payload))
                    .await?;
                open_envelope(body, CREATE_FALLBACK)
            })
            .await?;

        self.state.send_modify(|s| s.has_jobs = true);
        Ok(envelope)
    }

    /// Apply a partial update. Only the fields set on `patch` are sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for an empty patch, otherwise the
    /// call failure; either is recorded first.
    pub async fn update_job(&self, id: &str, patch: &JobPatch) -> Result<Envelope<Job>, ApiError> {
        self.track("update", async {
            if patch.is_empty() {
                return Err(ApiError::InvalidRequest("no job fields to update".into()));
            }
            let payload = serde_json::to_value(patch)
                .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
            let body = self
                .transport
                .send(&endpoints::job(id), ApiRequest::patch_json(payload))
                .await?;
            open_envelope(body, UPDATE_FALLBACK)
        })
        .await
    }

    /// Delete a job. `has_jobs` is left as is; re-list to refresh it.
    ///
    /// # Errors
    ///
    /// Returns the failure after recording its message.
    pub async fn delete_job(&self, id: &str) -> Result<Envelope<Value>, ApiError> {
        self.track("delete", async {
            let body = self
                .transport
                .send(&endpoints::job(id), ApiRequest::delete())
                .await?;
            open_envelope(body, DELETE_FALLBACK)
        })
        .await
    }

    async fn track<R>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<R, ApiError>>,
    ) -> Result<R, ApiError> {
        let _loading = LoadingGuard::start(&self.state);
        let result = call.await;
        if let Err(error) = &result {
            tracing::warn!(operation, %error, "jobs request failed");
            let message = error.to_string();
            self.state.send_modify(|s| s.error = Some(message));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medhire_client::Method;
    use medhire_client::test_support::ScriptedTransport;
    use medhire_core::JobStatus;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn job(id: u64, title: &str) -> Value {
        json!({"id": id, "title": title, "status": "OPEN"})
    }

    #[tokio::test]
    async fn list_sends_only_set_filters() {
        let store = JobsStore::new(
            ScriptedTransport::new().respond(json!({"success": true, "data": {"jobs": []}})),
        );

        store
            .get_jobs(JobFilter {
                status: Some(JobStatus::Open),
                page: Some(2),
                ..JobFilter::default()
            })
            .await
            .unwrap();

        let call = store.transport.last_call().unwrap();
        assert_eq!(call.endpoint, endpoints::JOBS);
        assert_eq!(call.method(), Method::Get);
        assert_eq!(call.request.query, Some(json!({"status": "OPEN", "page": 2})));
    }

    #[tokio::test]
    async fn unfiltered_list_has_no_query() {
        let store = JobsStore::new(
            ScriptedTransport::new().respond(json!({"success": true, "data": {"jobs": []}})),
        );
        store.get_jobs(JobFilter::default()).await.unwrap();
        assert!(store.transport.last_call().unwrap().request.query.is_none());
    }

    #[tokio::test]
    async fn list_derives_has_jobs_from_total() {
        let store = JobsStore::new(ScriptedTransport::new().respond(json!({
            "success": true,
            "data": {"jobs": [], "pagination": {"page": 9, "total": 14}}
        })));

        store.get_jobs(JobFilter::default()).await.unwrap();
        assert!(store.has_jobs());
    }

    #[tokio::test]
    async fn list_without_data_means_no_jobs() {
        let store = JobsStore::new(
            ScriptedTransport::new()
                .respond(json!({"success": true, "data": {"jobs": [job(1, "ICU RN")]}}))
                .respond(json!({"success": true})),
        );

        store.get_jobs(JobFilter::default()).await.unwrap();
        assert!(store.has_jobs());
        store.get_jobs(JobFilter::default()).await.unwrap();
        assert!(!store.has_jobs());
    }

    #[tokio::test]
    async fn detail_accepts_legacy_title() {
        let store = JobsStore::new(ScriptedTransport::new().respond(json!({
            "success": true,
            "data": {"id": 5, "job_title": "Travel CNA"}
        })));

        let envelope = store.get_job("5").await.unwrap();
        assert_eq!(envelope.data.unwrap().title, "Travel CNA");
        assert_eq!(store.transport.last_call().unwrap().endpoint, "/recruiter/jobs/5");
    }

    #[tokio::test]
    async fn update_sends_patch_with_set_fields_only() {
        let store = JobsStore::new(
            ScriptedTransport::new().respond(json!({"success": true, "data": job(5, "ICU RN")})),
        );

        store
            .update_job(
                "5",
                &JobPatch {
                    status: Some(JobStatus::Paused),
                    ..JobPatch::default()
                },
            )
            .await
            .unwrap();

        let call = store.transport.last_call().unwrap();
        assert_eq!(call.method(), Method::Patch);
        assert_eq!(call.request.json_body().unwrap(), &json!({"status": "PAUSED"}));
    }

    #[tokio::test]
    async fn empty_patch_is_rejected_without_a_call() {
        let store = JobsStore::new(ScriptedTransport::new());

        let err = store.update_job("5", &JobPatch::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
        assert_eq!(store.transport.call_count(), 0);
        assert_eq!(store.error().as_deref(), Some("Invalid request: no job fields to update"));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn blank_title_is_rejected_before_create() {
        let store = JobsStore::new(ScriptedTransport::new());
        let draft = JobDraft {
            title: "  ".into(),
            ..JobDraft::default()
        };
        assert!(store.create_job(&draft).await.is_err());
        assert!(!store.has_jobs());
        assert_eq!(store.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn successful_call_clears_previous_error() {
        let store = JobsStore::new(
            ScriptedTransport::new()
                .fail(ApiError::Transport("timed out".into()))
                .respond(json!({"success": true, "data": job(1, "ICU RN")})),
        );

        assert!(store.get_job("1").await.is_err());
        assert_eq!(store.error().as_deref(), Some("timed out"));

        store.get_job("1").await.unwrap();
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn dropped_call_still_clears_loading() {
        let store = JobsStore::new(ScriptedTransport::new());
        {
            let _guard = LoadingGuard::start(&store.state);
            assert!(store.is_loading());
        }
        assert!(!store.is_loading());
    }
}
