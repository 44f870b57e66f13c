use crate::error::SearchError;
use crate::models::{NameRequest, PreferenceRequest, RecommendationResponse, SchoolRecord};
use crate::traits::RecommendationApi;

/// Receives the loading-lifecycle signals around each backend call. A UI
/// maps these to its busy indicator; tests record them.
pub trait ProgressSink {
    fn search_started(&mut self);

    fn search_finished(&mut self);
}

/// No-op sink for callers without a loading indicator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn search_started(&mut self) {}

    fn search_finished(&mut self) {}
}

/// Submits recommendation calls, pairing every call with exactly one
/// started/finished signal no matter how the call settles. Does not enforce
/// mutual exclusion between calls; the caller submits one at a time.
pub struct RecommendationClient<A, P> {
    api: A,
    progress: P,
}

impl<A, P> RecommendationClient<A, P>
where
    A: RecommendationApi + Send + Sync,
    P: ProgressSink + Send,
{
    pub fn new(api: A, progress: P) -> Self {
        Self { api, progress }
    }

    pub async fn submit_by_name(
        &mut self,
        request: &NameRequest,
    ) -> Result<RecommendationResponse, SearchError> {
        self.progress.search_started();
        let outcome = self.api.recommend_by_name(request).await;
        self.progress.search_finished();
        outcome
    }

    pub async fn submit_by_preferences(
        &mut self,
        request: &PreferenceRequest,
    ) -> Result<RecommendationResponse, SearchError> {
        self.progress.search_started();
        let outcome = self.api.recommend_by_preferences(request).await;
        self.progress.search_finished();
        outcome
    }

    pub async fn lookup_details(
        &mut self,
        school_name: &str,
    ) -> Result<SchoolRecord, SearchError> {
        self.progress.search_started();
        let outcome = self.api.school_details(school_name).await;
        self.progress.search_finished();
        outcome
    }
}
