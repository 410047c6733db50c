/// Observable jobs state.
///
/// `has_jobs` is a cache derived from the most recent successful list or
/// create. Deletes do not touch it; re-list to refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobsState {
    pub has_jobs: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}
