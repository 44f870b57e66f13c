use crate::models::{SchoolRecord, NOT_AVAILABLE};

/// View state for a finished search: either a placeholder or a ranked list.
/// A presentation layer materializes this; the core never touches a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    NoRecommendations,
    Ranked(Vec<ResultCard>),
}

/// One rendered recommendation. Rank is the 1-based position in the
/// backend's ordering; nothing here re-sorts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub rank: usize,
    pub school_name: String,
    pub location: String,
    pub city: String,
    pub zipcode: String,
    pub total_students: String,
    pub school_grade: String,
}

pub fn render_results(records: &[SchoolRecord]) -> ResultsView {
    if records.is_empty() {
        return ResultsView::NoRecommendations;
    }

    let cards = records
        .iter()
        .enumerate()
        .map(|(index, record)| ResultCard {
            rank: index + 1,
            school_name: record.school_name.clone(),
            location: format!("{}, {}", record.city, record.zipcode),
            city: record.city.clone(),
            zipcode: record.zipcode.clone(),
            total_students: record
                .total_students
                .map(format_count)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            school_grade: record.school_grade.clone(),
        })
        .collect();

    ResultsView::Ranked(cards)
}

/// Groups digits in threes: 1234567 -> "1,234,567".
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}
