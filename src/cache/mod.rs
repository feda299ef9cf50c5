//! Per-worker cache of resolved company pages
//!
//! Company lookups open a secondary tab and navigate away from the profile,
//! so each company identifier is resolved at most once per worker. Failed
//! lookups are cached as the sentinel record too, which keeps a broken
//! company page from being retried for every profile that links to it.

mod company_page;

pub use company_page::parse_company_page;

use crate::browser::BrowserSession;
use crate::model::not_available;
use std::collections::HashMap;
use url::Url;

/// Company fields resolved from a company page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub industry: String,
    pub name: String,
    /// Raw location text, parsed into a `Location` by the caller
    pub location: String,
}

impl CompanyRecord {
    /// The all-sentinel record
    pub fn unavailable() -> Self {
        Self {
            industry: not_available(),
            name: not_available(),
            location: not_available(),
        }
    }
}

/// Derives the stable company identifier from a link
///
/// Only links whose first path segment is `company` reference a company
/// page. The identifier is `<scheme>://<host>/company/<slug>/`, so query
/// strings, fragments and sub-pages all map to the same key.
///
/// # Examples
///
/// ```
/// use profile_scraper::cache::company_identifier;
///
/// assert_eq!(
///     company_identifier("https://example.com/company/acme/life/?trk=x").as_deref(),
///     Some("https://example.com/company/acme/")
/// );
/// assert_eq!(company_identifier("https://example.com/school/poli/"), None);
/// ```
pub fn company_identifier(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let host = url.host_str()?;
    let mut segments = url.path_segments()?;

    if segments.next()? != "company" {
        return None;
    }

    let slug = segments.next().filter(|s| !s.is_empty())?;
    Some(format!("{}://{}/company/{}/", url.scheme(), host, slug))
}

/// Company lookups scoped to one worker's run
#[derive(Debug, Default)]
pub struct CompanyCache {
    entries: HashMap<String, CompanyRecord>,
    page_loads: usize,
}

impl CompanyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves company data for a link found on a profile
    ///
    /// Links that do not reference a company page resolve to the sentinel
    /// record without touching the browser. Known identifiers are served
    /// from the cache. Otherwise the page is loaded once in a secondary tab.
    pub async fn resolve(
        &mut self,
        session: &mut dyn BrowserSession,
        link: &str,
    ) -> CompanyRecord {
        let Some(id) = company_identifier(link) else {
            tracing::debug!("Not a company page: {}", link);
            return CompanyRecord::unavailable();
        };

        if let Some(record) = self.entries.get(&id) {
            tracing::trace!("Company cache hit for {}", id);
            return record.clone();
        }

        self.page_loads += 1;
        let record = load_company(session, &id).await;
        self.entries.insert(id, record.clone());
        record
    }

    /// Number of company pages actually loaded
    pub fn page_loads(&self) -> usize {
        self.page_loads
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CompanyRecord> {
        self.entries.get(id)
    }
}

/// Loads a company page in a secondary tab, degrading any failure to the
/// sentinel record
async fn load_company(session: &mut dyn BrowserSession, id: &str) -> CompanyRecord {
    if let Err(e) = session.open_tab().await {
        tracing::warn!("Error opening company tab for {}: {}", id, e);
        return CompanyRecord::unavailable();
    }

    let record = match read_company(session, id).await {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!("Error reading company page {}: {}", id, e);
            CompanyRecord::unavailable()
        }
    };

    if let Err(e) = session.close_tab().await {
        tracing::warn!("Company tab for {} did not close: {}", id, e);
    }

    record
}

async fn read_company(
    session: &mut dyn BrowserSession,
    id: &str,
) -> crate::DriverResult<CompanyRecord> {
    session.navigate(id).await?;
    let source = session.page_source().await?;
    Ok(parse_company_page(&source))
}
