pub mod backend;
pub mod client;
pub mod error;
pub mod models;
pub mod normalize;
pub mod reference;
pub mod render;
pub mod request;
pub mod session;
pub mod state;
pub mod traits;

pub use backend::HttpApi;
pub use client::{ProgressSink, RecommendationClient, SilentProgress};
pub use error::{ReferenceError, SearchError};
pub use models::{
    LocationType, ModelId, NameRequest, PreferenceForm, PreferenceRequest,
    RecommendationResponse, SchoolRecord, SearchMode, NOT_AVAILABLE, UNKNOWN_SCHOOL,
};
pub use normalize::{normalize_record, parse_response};
pub use reference::ReferenceData;
pub use render::{format_count, render_results, ResultCard, ResultsView};
pub use request::{build_name_request, build_preference_request};
pub use session::{SearchOutcome, SearchSession};
pub use state::SearchState;
pub use traits::{RecommendationApi, ReferenceApi};
