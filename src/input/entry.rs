use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Accepts http(s)/ftp(s) addresses on a domain name, localhost, or an IPv4
/// host, with an optional port and path
static ADDRESS_PATTERN: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:http|ftp)s?://(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|localhost|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?::\d+)?(?:/?|[/?]\S+)$",
    )
});

/// Graduation dates are written day/month/two-digit-year
const GRADUATION_DATE_FORMAT: &str = "%d/%m/%y";

/// A parsed input entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Profile address, always ending in '/'
    pub address: String,

    /// Graduation date supplied alongside the address, if any
    pub graduation: Option<NaiveDate>,
}

/// Errors parsing an input entry
#[derive(Debug, Error)]
pub enum EntryParseError {
    #[error("invalid graduation date '{value}': {source}")]
    GraduationDate {
        value: String,
        source: chrono::ParseError,
    },
}

/// Parses an entry of the form `<address>` or `<address><delimiter><dd/mm/yy>`
///
/// The address is normalized to carry a trailing '/'. Address syntax is not
/// checked here; see [`is_address_valid`].
///
/// # Examples
///
/// ```
/// use profile_scraper::input::parse_entry;
///
/// let entry = parse_entry("https://example.com/in/jdoe:::01/01/20", ":::").unwrap();
/// assert_eq!(entry.address, "https://example.com/in/jdoe/");
/// assert_eq!(entry.graduation.unwrap().to_string(), "2020-01-01");
/// ```
pub fn parse_entry(line: &str, delimiter: &str) -> Result<Entry, EntryParseError> {
    let (address, graduation) = match line.split_once(delimiter) {
        Some((address, date)) => {
            let date = date.trim();
            let graduation = NaiveDate::parse_from_str(date, GRADUATION_DATE_FORMAT).map_err(
                |source| EntryParseError::GraduationDate {
                    value: date.to_string(),
                    source,
                },
            )?;
            (address, Some(graduation))
        }
        None => (line, None),
    };

    Ok(Entry {
        address: normalize_address(address),
        graduation,
    })
}

/// Ensures the address ends with a path separator
pub fn normalize_address(address: &str) -> String {
    let address = address.trim();
    if address.ends_with('/') {
        address.to_string()
    } else {
        format!("{}/", address)
    }
}

/// Returns true if the address is a well-formed absolute URL
///
/// If the address pattern failed to compile, every address is rejected.
pub fn is_address_valid(address: &str) -> bool {
    match &*ADDRESS_PATTERN {
        Ok(pattern) => pattern.is_match(address),
        Err(e) => {
            tracing::error!("Address pattern failed to compile: {}", e);
            false
        }
    }
}
