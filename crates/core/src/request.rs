use crate::error::SearchError;
use crate::models::{LocationType, ModelId, NameRequest, PreferenceForm, PreferenceRequest};

/// Builds the name-search payload. The name must be non-empty once trimmed;
/// otherwise no request exists and the caller gets `EmptySchoolName` before
/// anything touches the network.
pub fn build_name_request(input: &str, model: ModelId) -> Result<NameRequest, SearchError> {
    let school_name = input.trim();
    if school_name.is_empty() {
        return Err(SearchError::EmptySchoolName);
    }

    Ok(NameRequest {
        school_name: school_name.to_string(),
        model,
    })
}

/// Builds the full preference payload from the partial form. Exactly one of
/// `city`/`zipcode` is populated, matching the location type; the inactive
/// one serializes as null. The auxiliary fields carry the constants the
/// backend expects in every request.
pub fn build_preference_request(
    form: &PreferenceForm,
    location_type: LocationType,
    model: ModelId,
) -> PreferenceRequest {
    let (city, zipcode) = match location_type {
        LocationType::City => (Some(form.city.clone()), None),
        LocationType::Zipcode => (None, Some(form.zipcode.clone())),
    };

    PreferenceRequest {
        location_type,
        city,
        zipcode,
        elementary: u8::from(form.elementary),
        intermediate: u8::from(form.intermediate),
        middle: u8::from(form.middle),
        high: u8::from(form.high),
        school_grade: parse_slider(&form.school_grade),
        proficiency: parse_slider(&form.proficiency),
        graduation_rate: parse_slider(&form.graduation_rate),
        model,
        title_i: 0,
        total_students: 1,
        race: 0,
        race_percentage: 1,
        dropout_rate: 0,
        ccri_points: 1,
        promotion_rate: 1,
        ap_courses: 1,
        chronic_absenteeism: 0,
        crime_rate: 0,
        bullying: 0,
        expenditure: 1,
        sel_protection: 1,
        respect_individuals: 1,
        discipline_support: 1,
        appropriate_content: 1,
        no_explicit_content: 1,
    }
}

// Sliders always carry a numeric string; anything else falls back to zero.
fn parse_slider(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}
