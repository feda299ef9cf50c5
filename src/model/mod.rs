//! Entity model for extracted career-history records
//!
//! All text fields default to the [`NOT_AVAILABLE`] sentinel when the page
//! does not expose them. Values are built by the extraction pipeline and are
//! not mutated afterwards.
//!
//! # Components
//!
//! - `Location`, `Company`, `Job`, `Education`: plain value records
//! - `JobHistorySummary`: derived view over a profile's job date ranges
//! - `Profile`: a complete record, enforcing the non-empty-list and
//!   current-job invariants in its constructors
//! - `ScrapingResult`: one outcome per input entry

mod entities;
mod history;
mod profile;

pub use entities::{Company, Education, Job, Location};
pub use history::{months_between, parse_date_range, DateRange, JobHistorySummary, RangeEnd};
pub use profile::{FailureKind, Profile, ScrapingResult};

/// Placeholder substituted for any field that could not be extracted
pub const NOT_AVAILABLE: &str = "N/A";

/// Returns an owned copy of the sentinel value
pub fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Returns true if the value is the sentinel placeholder
pub fn is_not_available(value: &str) -> bool {
    value == NOT_AVAILABLE
}
