use crate::models::{RecommendationResponse, SchoolRecord, NOT_AVAILABLE, UNKNOWN_SCHOOL};
use serde_json::Value;

// Ordered raw-key spellings per canonical field. The upstream dataset keeps
// trailing whitespace on some column names, so the same attribute can arrive
// under two spellings; the canonical snake_case spelling is listed too so
// normalizing an already-normalized record changes nothing.
const SCHOOL_NAME_ALIASES: &[&str] = &["School_name", "School_name ", "school_name"];
const CITY_ALIASES: &[&str] = &["city", "city "];
const ZIPCODE_ALIASES: &[&str] = &["zipcode"];
const TOTAL_STUDENTS_ALIASES: &[&str] = &["total_students"];
const SCHOOL_GRADE_ALIASES: &[&str] = &["School_grade", "school_grade"];

/// Maps one raw backend record onto the canonical shape. Total: a field
/// missing under every alias resolves to its marker, never to an error.
pub fn normalize_record(record: &Value) -> SchoolRecord {
    SchoolRecord {
        school_name: resolve_string(record, SCHOOL_NAME_ALIASES, UNKNOWN_SCHOOL),
        city: resolve_string(record, CITY_ALIASES, NOT_AVAILABLE),
        zipcode: resolve_string(record, ZIPCODE_ALIASES, NOT_AVAILABLE),
        total_students: resolve_count(record, TOTAL_STUDENTS_ALIASES),
        school_grade: resolve_string(record, SCHOOL_GRADE_ALIASES, NOT_AVAILABLE),
    }
}

/// Parses a full recommendation payload, normalizing every record and
/// keeping whatever metadata the backend sent along.
pub fn parse_response(payload: &Value) -> RecommendationResponse {
    let recommendations = payload
        .pointer("/recommendations")
        .and_then(Value::as_array)
        .map(|records| records.iter().map(normalize_record).collect())
        .unwrap_or_default();

    RecommendationResponse {
        recommendations,
        model_used: string_field(payload, "/model_used"),
        input_school: string_field(payload, "/input_school"),
        total_matches: payload.pointer("/total_matches").and_then(Value::as_u64),
        message: string_field(payload, "/message"),
    }
}

fn string_field(payload: &Value, pointer: &str) -> Option<String> {
    payload
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn first_present<'a>(record: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .find_map(|key| record.get(*key).filter(|value| !value.is_null()))
}

fn resolve_string(record: &Value, aliases: &[&str], missing: &str) -> String {
    match first_present(record, aliases) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => other.to_string(),
        None => missing.to_string(),
    }
}

fn resolve_count(record: &Value, aliases: &[&str]) -> Option<u64> {
    match first_present(record, aliases)? {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
