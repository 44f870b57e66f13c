use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ranking models the backend serves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ModelId {
    Knn,
    Rf,
    Svm,
}

impl ModelId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Knn => "knn",
            ModelId::Rf => "rf",
            ModelId::Svm => "svm",
        }
    }
}

impl Default for ModelId {
    fn default() -> Self {
        ModelId::Knn
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "knn" => Ok(ModelId::Knn),
            "rf" => Ok(ModelId::Rf),
            "svm" => Ok(ModelId::Svm),
            other => Err(format!("unknown model '{other}', expected knn, rf or svm")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    ByName,
    ByPreferences,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    City,
    Zipcode,
}

/// The preference fields a user actually edits. Slider values stay in their
/// UI string form until request building parses them.
#[derive(Debug, Clone, Default)]
pub struct PreferenceForm {
    pub city: String,
    pub zipcode: String,
    pub elementary: bool,
    pub intermediate: bool,
    pub middle: bool,
    pub high: bool,
    pub school_grade: String,
    pub proficiency: String,
    pub graduation_rate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NameRequest {
    pub school_name: String,
    pub model: ModelId,
}

/// Complete wire payload for a preference search. Every key is present in
/// every request; fields the form does not expose are pinned to the values
/// the backend models were trained against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreferenceRequest {
    pub location_type: LocationType,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub elementary: u8,
    pub intermediate: u8,
    pub middle: u8,
    pub high: u8,
    pub school_grade: i64,
    pub proficiency: i64,
    pub graduation_rate: i64,
    pub model: ModelId,
    pub title_i: u8,
    pub total_students: u8,
    pub race: u8,
    pub race_percentage: u8,
    pub dropout_rate: u8,
    pub ccri_points: u8,
    pub promotion_rate: u8,
    pub ap_courses: u8,
    pub chronic_absenteeism: u8,
    pub crime_rate: u8,
    pub bullying: u8,
    pub expenditure: u8,
    pub sel_protection: u8,
    pub respect_individuals: u8,
    pub discipline_support: u8,
    pub appropriate_content: u8,
    pub no_explicit_content: u8,
}

/// Marker rendered when a record field cannot be resolved.
pub const NOT_AVAILABLE: &str = "N/A";

/// Marker for a record whose name is missing under every known spelling.
pub const UNKNOWN_SCHOOL: &str = "Unknown School";

/// One recommendation after alias resolution: every field present, markers
/// standing in for anything the backend did not supply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchoolRecord {
    pub school_name: String,
    pub city: String,
    pub zipcode: String,
    pub total_students: Option<u64>,
    pub school_grade: String,
}

/// Parsed recommendation reply. An empty `recommendations` list is a valid
/// response, not an error; the metadata fields are whatever the backend
/// chose to report alongside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationResponse {
    pub recommendations: Vec<SchoolRecord>,
    pub model_used: Option<String>,
    pub input_school: Option<String>,
    pub total_matches: Option<u64>,
    pub message: Option<String>,
}
