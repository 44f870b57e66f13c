use crate::error::{ReferenceError, SearchError};
use crate::models::{NameRequest, PreferenceRequest, RecommendationResponse, SchoolRecord};
use async_trait::async_trait;

/// Startup reference lookups. All three must succeed before a session may
/// offer search.
#[async_trait]
pub trait ReferenceApi {
    async fn fetch_schools(&self) -> Result<Vec<String>, ReferenceError>;

    async fn fetch_cities(&self) -> Result<Vec<String>, ReferenceError>;

    async fn fetch_zipcodes(&self) -> Result<Vec<String>, ReferenceError>;
}

/// The recommendation calls themselves. Implementations surface a backend
/// `{ "error": ... }` body as `SearchError::RecommendationFailed`.
#[async_trait]
pub trait RecommendationApi {
    async fn recommend_by_name(
        &self,
        request: &NameRequest,
    ) -> Result<RecommendationResponse, SearchError>;

    async fn recommend_by_preferences(
        &self,
        request: &PreferenceRequest,
    ) -> Result<RecommendationResponse, SearchError>;

    async fn school_details(&self, school_name: &str) -> Result<SchoolRecord, SearchError>;
}
