//! Job history summary derived from displayed date ranges
//!
//! Date ranges are shown as "<start> – <end>" where each endpoint is
//! "Mon YYYY", a bare "YYYY", or "Present" for the end of an ongoing
//! position. Lists are ordered most recent first.

use chrono::NaiveDate;

/// End of a displayed date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    /// The position is ongoing
    Present,
    /// The position ended at this date
    Date(NaiveDate),
    /// The end could not be read
    Unknown,
}

/// A parsed job date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: RangeEnd,
}

/// Parses a displayed date range
///
/// Returns None if the text has no recognizable start or end.
///
/// # Examples
///
/// ```
/// use profile_scraper::model::{parse_date_range, RangeEnd};
///
/// let range = parse_date_range("Mar 2018 – Present").unwrap();
/// assert_eq!(range.end, RangeEnd::Present);
/// ```
pub fn parse_date_range(text: &str) -> Option<DateRange> {
    let mut parts = text
        .split(['–', '—', '-'])
        .map(str::trim)
        .filter(|part| !part.is_empty());

    let start_text = parts.next()?;
    let start = parse_endpoint(start_text);

    let end = match parts.next() {
        Some(end_text) if end_text.eq_ignore_ascii_case("present") => RangeEnd::Present,
        Some(end_text) => parse_endpoint(end_text).map_or(RangeEnd::Unknown, RangeEnd::Date),
        // A single endpoint means the position started and ended in the same period
        None => start.map_or(RangeEnd::Unknown, RangeEnd::Date),
    };

    if start.is_none() && end == RangeEnd::Unknown {
        return None;
    }

    Some(DateRange { start, end })
}

/// Parses "Mon YYYY" or "YYYY" into the first day of that period
fn parse_endpoint(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(&format!("01 {}", text), "%d %b %Y") {
        return Some(date);
    }

    if text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()) {
        let year = text.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}

/// Whole 30-day months between two dates, in either order
pub fn months_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs() / 30
}

/// Summary of a subject's job history relative to their graduation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobHistorySummary {
    /// Start of the oldest position
    pub first_job_date: Option<NaiveDate>,

    /// End of the most recent position; None while it is ongoing
    pub last_job_date: Option<NaiveDate>,

    /// The most recent position has a closed end date
    pub is_currently_unemployed: bool,

    /// Any position started before graduation; None without a graduation date
    pub is_working_while_studying: Option<bool>,

    /// Months from graduation to the first position started after it
    pub months_to_first_job: Option<i64>,
}

impl JobHistorySummary {
    /// Builds the summary from a known graduation date and the job date
    /// ranges, most recent first
    pub fn new(graduation: Option<NaiveDate>, date_ranges: &[String]) -> Self {
        let ranges: Vec<Option<DateRange>> =
            date_ranges.iter().map(|r| parse_date_range(r)).collect();

        let most_recent = ranges.first().copied().flatten();
        let oldest = ranges.last().copied().flatten();

        let last_job_date = match most_recent.map(|r| r.end) {
            Some(RangeEnd::Date(date)) => Some(date),
            _ => None,
        };

        let starts: Vec<NaiveDate> = ranges.iter().flatten().filter_map(|r| r.start).collect();

        let (is_working_while_studying, months_to_first_job) = match graduation {
            Some(graduated) => {
                let working = starts.iter().any(|start| *start < graduated);
                let first_after = starts.iter().filter(|start| **start >= graduated).min();
                (
                    Some(working),
                    first_after.map(|start| months_between(graduated, *start)),
                )
            }
            None => (None, None),
        };

        Self {
            first_job_date: oldest.and_then(|r| r.start),
            last_job_date,
            is_currently_unemployed: last_job_date.is_some(),
            is_working_while_studying,
            months_to_first_job,
        }
    }
}
