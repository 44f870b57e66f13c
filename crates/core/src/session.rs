use crate::client::{ProgressSink, RecommendationClient};
use crate::error::{ReferenceError, SearchError};
use crate::models::{
    LocationType, ModelId, PreferenceForm, RecommendationResponse, SchoolRecord, SearchMode,
};
use crate::reference::ReferenceData;
use crate::render::{render_results, ResultsView};
use crate::request::{build_name_request, build_preference_request};
use crate::state::SearchState;
use crate::traits::{RecommendationApi, ReferenceApi};

/// Everything one submission produced: the renderable view plus the metadata
/// the backend reports alongside it.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub view: ResultsView,
    pub model_used: Option<String>,
    pub input_school: Option<String>,
    pub total_matches: Option<u64>,
    pub message: Option<String>,
}

impl SearchOutcome {
    fn from_response(response: RecommendationResponse) -> Self {
        Self {
            view: render_results(&response.recommendations),
            model_used: response.model_used,
            input_school: response.input_school,
            total_matches: response.total_matches,
            message: response.message,
        }
    }
}

/// Composition root for one page session: reference data loaded up front,
/// the toggle state machine, and the submitting client.
pub struct SearchSession<A, P> {
    reference: ReferenceData,
    state: SearchState,
    client: RecommendationClient<A, P>,
}

impl<A, P> std::fmt::Debug for SearchSession<A, P> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SearchSession")
            .field("reference", &self.reference)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<A, P> SearchSession<A, P>
where
    A: ReferenceApi + RecommendationApi + Send + Sync,
    P: ProgressSink + Send,
{
    /// Loads reference data before anything else; a failure here means the
    /// session never becomes searchable.
    pub async fn start(api: A, progress: P) -> Result<Self, ReferenceError> {
        let reference = ReferenceData::load(&api).await?;

        Ok(Self {
            reference,
            state: SearchState::default(),
            client: RecommendationClient::new(api, progress),
        })
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.state.set_mode(mode);
    }

    pub fn set_location_type(&mut self, location_type: LocationType) {
        self.state.set_location_type(location_type);
    }

    pub fn select_model(&mut self, mode: SearchMode, model: ModelId) {
        self.state.select_model(mode, model);
    }

    /// Name search with the model currently selected for name mode. The
    /// presence check runs before any signal or network traffic.
    pub async fn search_by_name(
        &mut self,
        school_name: &str,
    ) -> Result<SearchOutcome, SearchError> {
        let request = build_name_request(school_name, self.state.model_for_name())?;
        let response = self.client.submit_by_name(&request).await?;
        Ok(SearchOutcome::from_response(response))
    }

    /// Preference search. Location type and model are snapshotted from the
    /// state machine here, so a toggle after submission cannot change an
    /// in-flight request.
    pub async fn search_by_preferences(
        &mut self,
        form: &PreferenceForm,
    ) -> Result<SearchOutcome, SearchError> {
        let request = build_preference_request(
            form,
            self.state.location_type(),
            self.state.model_for_preferences(),
        );
        let response = self.client.submit_by_preferences(&request).await?;
        Ok(SearchOutcome::from_response(response))
    }

    pub async fn school_details(
        &mut self,
        school_name: &str,
    ) -> Result<SchoolRecord, SearchError> {
        self.client.lookup_details(school_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NameRequest, PreferenceRequest};
    use crate::normalize::parse_response;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    // Observable parts are shared so a clone handed to the session can be
    // inspected from the test afterwards.
    #[derive(Clone, Default)]
    struct FakeBackend {
        fail_reference: bool,
        fail_search: bool,
        response_payload: serde_json::Value,
        name_calls: Arc<AtomicUsize>,
        last_name_request: Arc<Mutex<Option<NameRequest>>>,
        last_preference_request: Arc<Mutex<Option<PreferenceRequest>>>,
    }

    #[async_trait]
    impl ReferenceApi for FakeBackend {
        async fn fetch_schools(&self) -> Result<Vec<String>, ReferenceError> {
            if self.fail_reference {
                return Err(ReferenceError::Fetch {
                    resource: "schools",
                    status: "503 Service Unavailable".to_string(),
                });
            }
            Ok(vec!["Lincoln Elementary".to_string()])
        }

        async fn fetch_cities(&self) -> Result<Vec<String>, ReferenceError> {
            Ok(vec!["Springfield".to_string()])
        }

        async fn fetch_zipcodes(&self) -> Result<Vec<String>, ReferenceError> {
            Ok(vec!["00501".to_string(), "02139".to_string()])
        }
    }

    #[async_trait]
    impl RecommendationApi for FakeBackend {
        async fn recommend_by_name(
            &self,
            request: &NameRequest,
        ) -> Result<RecommendationResponse, SearchError> {
            self.name_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_name_request.lock().unwrap() = Some(request.clone());

            if self.fail_search {
                return Err(SearchError::RecommendationFailed(
                    "School not found".to_string(),
                ));
            }
            Ok(parse_response(&self.response_payload))
        }

        async fn recommend_by_preferences(
            &self,
            request: &PreferenceRequest,
        ) -> Result<RecommendationResponse, SearchError> {
            *self.last_preference_request.lock().unwrap() = Some(request.clone());
            Ok(parse_response(&self.response_payload))
        }

        async fn school_details(
            &self,
            _school_name: &str,
        ) -> Result<SchoolRecord, SearchError> {
            Err(SearchError::RecommendationFailed(
                "School not found".to_string(),
            ))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingProgress {
        events: Arc<Mutex<Vec<&'static str>>>,
    }

    impl RecordingProgress {
        fn events(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressSink for RecordingProgress {
        fn search_started(&mut self) {
            self.events.lock().unwrap().push("started");
        }

        fn search_finished(&mut self) {
            self.events.lock().unwrap().push("finished");
        }
    }

    fn lincoln_payload() -> serde_json::Value {
        json!({
            "input_school": "Lincoln Elementary",
            "model_used": "knn",
            "recommendations": [{
                "School_name": "Lincoln Elementary",
                "city": "Springfield",
                "zipcode": "00501",
                "total_students": 450,
                "School_grade": "A",
            }],
        })
    }

    #[tokio::test]
    async fn name_search_renders_the_rank_one_card() {
        let backend = FakeBackend {
            response_payload: lincoln_payload(),
            ..FakeBackend::default()
        };
        let mut session = SearchSession::start(backend.clone(), RecordingProgress::default())
            .await
            .expect("session should start");

        let outcome = session.search_by_name("Lincoln Elementary").await.unwrap();

        let request = backend.last_name_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.school_name, "Lincoln Elementary");
        assert_eq!(request.model, ModelId::Knn);

        assert_eq!(outcome.model_used.as_deref(), Some("knn"));
        match outcome.view {
            ResultsView::Ranked(cards) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].rank, 1);
                assert_eq!(cards[0].school_name, "Lincoln Elementary");
                assert_eq!(cards[0].location, "Springfield, 00501");
                assert_eq!(cards[0].total_students, "450");
                assert_eq!(cards[0].school_grade, "A");
            }
            other => panic!("expected ranked cards, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_name_never_reaches_the_backend() {
        let backend = FakeBackend::default();
        let progress = RecordingProgress::default();
        let mut session = SearchSession::start(backend.clone(), progress.clone())
            .await
            .unwrap();

        let error = session.search_by_name("   ").await.unwrap_err();
        assert!(matches!(error, SearchError::EmptySchoolName));
        assert_eq!(backend.name_calls.load(Ordering::SeqCst), 0);
        assert!(progress.events().is_empty());
    }

    #[tokio::test]
    async fn preference_search_snapshots_location_and_model() {
        let backend = FakeBackend {
            response_payload: json!({"recommendations": []}),
            ..FakeBackend::default()
        };
        let mut session = SearchSession::start(backend.clone(), RecordingProgress::default())
            .await
            .unwrap();

        session.set_mode(SearchMode::ByPreferences);
        session.set_location_type(LocationType::Zipcode);
        session.select_model(SearchMode::ByPreferences, ModelId::Svm);

        let form = PreferenceForm {
            zipcode: "02139".to_string(),
            ..PreferenceForm::default()
        };
        let outcome = session.search_by_preferences(&form).await.unwrap();

        let request = backend
            .last_preference_request
            .lock()
            .unwrap()
            .clone()
            .unwrap();
        assert_eq!(request.location_type, LocationType::Zipcode);
        assert_eq!(request.city, None);
        assert_eq!(request.zipcode.as_deref(), Some("02139"));
        assert_eq!(request.model, ModelId::Svm);
        assert_eq!(request.elementary, 0);
        assert_eq!(request.intermediate, 0);
        assert_eq!(request.middle, 0);
        assert_eq!(request.high, 0);

        assert_eq!(outcome.view, ResultsView::NoRecommendations);
    }

    #[tokio::test]
    async fn zero_match_responses_surface_the_backend_message() {
        let backend = FakeBackend {
            response_payload: json!({
                "model_used": "rf",
                "recommendations": [],
                "total_matches": 0,
                "message": "No schools match your criteria. Try adjusting your preferences.",
            }),
            ..FakeBackend::default()
        };
        let mut session = SearchSession::start(backend.clone(), RecordingProgress::default())
            .await
            .unwrap();

        session.set_mode(SearchMode::ByPreferences);
        let outcome = session
            .search_by_preferences(&PreferenceForm::default())
            .await
            .unwrap();

        assert_eq!(outcome.view, ResultsView::NoRecommendations);
        assert_eq!(outcome.total_matches, Some(0));
        assert!(outcome
            .message
            .as_deref()
            .unwrap()
            .contains("No schools match"));
    }

    #[tokio::test]
    async fn failed_search_clears_the_loading_signal_and_is_retryable() {
        let backend = FakeBackend {
            fail_search: true,
            response_payload: json!({}),
            ..FakeBackend::default()
        };
        let progress = RecordingProgress::default();
        let mut session = SearchSession::start(backend.clone(), progress.clone())
            .await
            .unwrap();

        let error = session.search_by_name("Nowhere Middle").await.unwrap_err();
        assert!(matches!(error, SearchError::RecommendationFailed(_)));
        assert_eq!(progress.events(), vec!["started", "finished"]);

        // A second submission is a fresh call with a fresh signal pair.
        let _ = session.search_by_name("Nowhere Middle").await;
        assert_eq!(
            progress.events(),
            vec!["started", "finished", "started", "finished"]
        );
        assert_eq!(backend.name_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn reference_failure_blocks_the_session() {
        let backend = FakeBackend {
            fail_reference: true,
            ..FakeBackend::default()
        };

        let error = SearchSession::start(backend, RecordingProgress::default())
            .await
            .expect_err("session must not start");
        assert!(matches!(error, ReferenceError::Fetch { .. }));
    }

    #[tokio::test]
    async fn session_exposes_loaded_reference_data() {
        let backend = FakeBackend::default();
        let session = SearchSession::start(backend, RecordingProgress::default())
            .await
            .unwrap();

        assert_eq!(session.reference().school_count(), 1);
        assert_eq!(session.reference().zipcode_count(), 2);
        assert_eq!(session.state().mode(), SearchMode::ByName);
    }
}
