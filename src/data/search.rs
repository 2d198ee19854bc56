// ============================================================
// Layer 4 — Company Search
// ============================================================
// Case-insensitive substring match of a query against the
// company_name column. The query is trimmed first; an empty
// query matches nothing.

use crate::domain::pitch::PitchRecord;

/// Return every record whose company name contains the query.
/// Dataset order is preserved.
pub fn find_by_company<'a>(records: &'a [PitchRecord], query: &str) -> Vec<&'a PitchRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|r| r.company_name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Vec<PitchRecord> {
        vec![
            PitchRecord::new("Airbnb", "Book rooms with locals."),
            PitchRecord::new("Stripe", "Payments infrastructure for the internet."),
            PitchRecord::new("AirTable", "A spreadsheet that is a database."),
        ]
    }

    #[test]
    fn test_case_insensitive_substring() {
        let records = dataset();
        let hits = find_by_company(&records, "  AIR ");
        let names: Vec<&str> = hits.iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(names, vec!["Airbnb", "AirTable"]);
    }

    #[test]
    fn test_no_match() {
        let records = dataset();
        assert!(find_by_company(&records, "dropbox").is_empty());
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let records = dataset();
        assert!(find_by_company(&records, "   ").is_empty());
    }
}
