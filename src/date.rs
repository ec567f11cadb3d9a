use chrono::NaiveDateTime;

const GITHUB_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const MEDIUM_DATE_FORMAT: &str = "%B %-d, %Y";

/// Formats a GitHub timestamp such as `2024-01-01T00:00:00Z` as `January 1, 2024`.
///
/// Input that is not in GitHub's UTC timestamp format is returned unchanged.
pub fn format_iso_date(date: &str) -> String {
    match NaiveDateTime::parse_from_str(date, GITHUB_TIMESTAMP_FORMAT) {
        Ok(parsed) => parsed.and_utc().format(MEDIUM_DATE_FORMAT).to_string(),
        Err(_) => date.to_string(),
    }
}
