//! Structural parsing of a rendered profile page
//!
//! This module works on the page source captured after lazy content has been
//! loaded. Each field lookup returns an `Option`; a missing field becomes a
//! sentinel further up. A list entry whose nested structure is present but
//! malformed is reported as an [`EntryError`] so the caller can drop just that
//! entry.

use crate::model::{not_available, Education};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

/// Employment-type suffixes the site appends to the inline company name
const EMPLOYMENT_TYPES: &[&str] = &["Full-time", "Part-time"];

/// Labels preceding degree and field values in the education block
const DEGREE_LABEL: &str = "Degree Name";
const FIELD_LABEL: &str = "Field Of Study";

/// Reasons a single list entry is dropped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("entry has no company link")]
    MissingCompanyLink,

    #[error("malformed {0} block")]
    Malformed(&'static str),
}

/// Fields read from one experience entry, before company resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawJobEntry {
    pub daterange: Option<String>,
    pub title: Option<String>,
    /// Absolute address of the linked company (or other) page
    pub company_link: String,
    pub inline_company: Option<String>,
    pub inline_location: Option<String>,
}

/// Everything the pipeline needs from the rendered profile source
#[derive(Debug, Clone, Default)]
pub struct ProfilePage {
    /// Display name; None if the anchor structure is missing
    pub name: Option<String>,

    /// One item per experience entry, in page order
    pub jobs: Vec<Result<RawJobEntry, EntryError>>,

    /// One item per education entry, in page order
    pub education: Vec<Result<Education, EntryError>>,
}

impl ProfilePage {
    /// Parses the page source; relative links are resolved against `base_url`
    pub fn parse(html: &str, base_url: &Url) -> Self {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let jobs = match list_entries(root, "#experience-section", "li") {
            Some(entries) => entries
                .into_iter()
                .map(|entry| parse_job_entry(entry, base_url))
                .collect(),
            None => {
                tracing::warn!("Experience section not found on {}", base_url);
                Vec::new()
            }
        };

        let education = match list_entries(root, "#education-section", "li") {
            Some(entries) => entries.into_iter().map(parse_education_entry).collect(),
            None => {
                tracing::warn!("Education section not found on {}", base_url);
                Vec::new()
            }
        };

        Self {
            name: profile_name(root),
            jobs,
            education,
        }
    }
}

/// Reads the display name from the first list item of the top card
fn profile_name(root: ElementRef<'_>) -> Option<String> {
    let top_card = select_first(root, "div.flex-1.mr5")?;
    let first_list = select_first(top_card, "ul")?;
    let item = select_first(first_list, "li")?;
    non_empty(text_of(item))
}

/// Collects the items of a section; None if the section itself is absent
fn list_entries<'a>(
    root: ElementRef<'a>,
    section: &str,
    item: &str,
) -> Option<Vec<ElementRef<'a>>> {
    let section = select_first(root, section)?;
    Some(select_all(section, item))
}

fn parse_job_entry(entry: ElementRef<'_>, base_url: &Url) -> Result<RawJobEntry, EntryError> {
    let daterange = match select_first(entry, ".pv-entity__date-range") {
        Some(block) => Some(
            nth_text(block, "span", 1).ok_or(EntryError::Malformed("date range"))?,
        ),
        None => None,
    };

    let title = select_first(entry, "h3").and_then(|h3| non_empty(text_of(h3)));

    let inline_company = select_first(entry, ".pv-entity__secondary-title")
        .and_then(|el| non_empty(strip_employment_type(&text_of(el))));

    let company_link = select_first(entry, "a[href]")
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| base_url.join(href.trim()).ok())
        .map(|url| url.to_string())
        .ok_or(EntryError::MissingCompanyLink)?;

    let inline_location = match select_first(entry, ".pv-entity__location") {
        Some(block) => Some(nth_text(block, "span", 1).ok_or(EntryError::Malformed("location"))?),
        None => None,
    };

    Ok(RawJobEntry {
        daterange,
        title,
        company_link,
        inline_company,
        inline_location,
    })
}

fn parse_education_entry(entry: ElementRef<'_>) -> Result<Education, EntryError> {
    let institution = select_first(entry, "h3")
        .and_then(|h3| non_empty(text_of(h3)))
        .unwrap_or_else(not_available);

    let (degreename, field) = match select_first(entry, ".pv-entity__degree-info") {
        Some(block) => {
            let tokens: Vec<String> = select_all(block, "span").into_iter().map(text_of).collect();
            scan_degree_tokens(&tokens)
        }
        None => (not_available(), not_available()),
    };

    let (start_year, end_year) = match select_first(entry, ".pv-entity__dates") {
        Some(block) => {
            let spans = select_all(block, "span");
            let range = spans.get(1).ok_or(EntryError::Malformed("dates"))?;
            let years: Vec<String> = select_all(*range, "time").into_iter().map(text_of).collect();
            match years.as_slice() {
                [start, end, ..] => (start.clone(), end.clone()),
                _ => return Err(EntryError::Malformed("dates")),
            }
        }
        None => (not_available(), not_available()),
    };

    Ok(Education {
        institution,
        degreename,
        field,
        start_year,
        end_year,
    })
}

/// Pairs degree name and field of study from a flat label/value token stream
///
/// A label token arms its slot; the very next token is consumed as that
/// slot's value. Both slots are tracked independently.
pub fn scan_degree_tokens(tokens: &[String]) -> (String, String) {
    let mut degreename = not_available();
    let mut field = not_available();
    let mut reading_degree = false;
    let mut reading_field = false;

    for token in tokens {
        if reading_degree {
            degreename = token.clone();
            reading_degree = false;
        } else if token == DEGREE_LABEL {
            reading_degree = true;
        }

        if reading_field {
            field = token.clone();
            reading_field = false;
        } else if token == FIELD_LABEL {
            reading_field = true;
        }
    }

    (degreename, field)
}

fn strip_employment_type(text: &str) -> String {
    let mut name = text.to_string();
    for kind in EMPLOYMENT_TYPES {
        name = name.replace(kind, "");
    }
    name.trim().to_string()
}

fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => scope.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Text of the n-th match within the scope
fn nth_text(scope: ElementRef<'_>, css: &str, n: usize) -> Option<String> {
    select_all(scope, css).get(n).map(|el| text_of(*el))
}

/// Rendered-style text: all descendant text with whitespace collapsed
fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
