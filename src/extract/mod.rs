//! Profile extraction pipeline
//!
//! A profile is extracted in two passes. Interactive steps (contact overlay,
//! lazy-load scrolling, "see more" expansion, skills) run as scripts in the
//! live tab. Everything else is read from the rendered page source in a
//! single synchronous parse, so no document handle is held across an await.
//!
//! Field-level failures become sentinel values and list-item failures drop
//! only that item. The display name is the one field whose absence fails
//! the whole profile.

mod page;
pub mod scripts;

pub use page::{scan_degree_tokens, EntryError, ProfilePage, RawJobEntry};

use crate::browser::BrowserSession;
use crate::cache::CompanyCache;
use crate::config::{ScraperConfig, SiteConfig};
use crate::input::is_address_valid;
use crate::model::{
    is_not_available, not_available, Company, FailureKind, Job, JobHistorySummary, Location,
    Profile, ScrapingResult,
};
use crate::DriverResult;
use chrono::NaiveDate;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Upper bound on lazy-load scroll steps for a single page
const MAX_SCROLLS: i64 = 50;

/// Outcome of one pass of the pipeline over an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The entry reached a final outcome
    Finished(ScrapingResult),

    /// Navigation landed somewhere unexpected; the session needs recovery
    Challenge { landed: String },
}

/// Runs the extraction steps for one profile at a time
#[derive(Debug, Clone)]
pub struct ProfileExtractor {
    unavailable_url: String,
    loading_pause: Duration,
    scroll_pause: Duration,
}

impl ProfileExtractor {
    pub fn new(site: &SiteConfig, scraper: &ScraperConfig) -> Self {
        Self {
            unavailable_url: site.unavailable_url.clone(),
            loading_pause: scraper.loading_pause(),
            scroll_pause: scraper.scroll_pause(),
        }
    }

    /// Extracts the profile at `address`
    ///
    /// Driver errors on navigation or page source reads propagate; every
    /// other step degrades to sentinel values. Repeating the call against an
    /// unchanged page yields an equal result.
    pub async fn extract(
        &self,
        session: &mut dyn BrowserSession,
        cache: &mut CompanyCache,
        address: &str,
        graduation: Option<NaiveDate>,
    ) -> DriverResult<Extraction> {
        if !is_address_valid(address) {
            return Ok(Extraction::Finished(FailureKind::BadFormattedLink.into()));
        }
        let Ok(base_url) = Url::parse(address) else {
            return Ok(Extraction::Finished(FailureKind::BadFormattedLink.into()));
        };

        session.navigate(address).await?;
        let landed = session.current_url().await?;
        let landed = landed.trim();

        if landed != address {
            if landed == self.unavailable_url {
                tracing::info!("Profile {} is no longer available", address);
                return Ok(Extraction::Finished(FailureKind::ProfileUnavailable.into()));
            }
            tracing::warn!("Expected {} but landed on {}", address, landed);
            return Ok(Extraction::Challenge {
                landed: landed.to_string(),
            });
        }

        let email = self.read_email(session).await;
        self.load_lazy_content(session).await;

        let source = session.page_source().await?;
        let page = ProfilePage::parse(&source, &base_url);

        let Some(name) = page.name else {
            tracing::warn!("No display name found on {}", address);
            return Ok(Extraction::Finished(FailureKind::NameNotFound.into()));
        };

        let skills = self.read_skills(session).await;

        let mut jobs = Vec::with_capacity(page.jobs.len());
        for (index, entry) in page.jobs.into_iter().enumerate() {
            match entry {
                Ok(raw) => jobs.push(build_job(session, cache, raw).await),
                Err(e) => tracing::warn!("Skipping job entry {} on {}: {}", index, address, e),
            }
        }

        let mut education = Vec::with_capacity(page.education.len());
        for (index, entry) in page.education.into_iter().enumerate() {
            match entry {
                Ok(edu) => education.push(edu),
                Err(e) => {
                    tracing::warn!("Skipping education entry {} on {}: {}", index, address, e)
                }
            }
        }

        let profile = if jobs.is_empty() {
            Profile::new(name, email, skills)
        } else {
            let ranges: Vec<String> = jobs.iter().map(|job| job.daterange.clone()).collect();
            let summary = JobHistorySummary::new(graduation, &ranges);
            Profile::with_career(name, email, skills, jobs, summary, education)
        };

        Ok(Extraction::Finished(profile.into()))
    }

    async fn read_email(&self, session: &mut dyn BrowserSession) -> String {
        if let Err(e) = session.execute(scripts::CLICK_CONTACT_INFO).await {
            tracing::debug!("Contact info overlay not opened: {}", e);
        }
        tokio::time::sleep(self.loading_pause).await;

        let email = match session.execute(scripts::READ_EMAIL).await {
            Ok(Value::String(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => not_available(),
            Err(e) => {
                tracing::debug!("Email not found: {}", e);
                not_available()
            }
        };

        if let Err(e) = session.execute(scripts::DISMISS_MODAL).await {
            tracing::debug!("Contact info overlay not dismissed: {}", e);
        }

        email
    }

    /// Scrolls one window height at a time until the page stops growing,
    /// then expands the "see more" section
    async fn load_lazy_content(&self, session: &mut dyn BrowserSession) {
        let window_height = match session.execute(scripts::WINDOW_HEIGHT).await {
            Ok(value) => as_pixels(&value),
            Err(e) => {
                tracing::debug!("Window height unavailable: {}", e);
                None
            }
        };

        if let Some(step) = window_height.filter(|h| *h > 0) {
            let mut scrolls = 1;
            while scrolls <= MAX_SCROLLS {
                let page_height = match session.execute(scripts::PAGE_HEIGHT).await {
                    Ok(value) => as_pixels(&value).unwrap_or(0),
                    Err(_) => 0,
                };
                if step * scrolls >= page_height {
                    break;
                }
                if let Err(e) = session.execute(&scripts::scroll_to(step * scrolls)).await {
                    tracing::debug!("Scroll step {} failed: {}", scrolls, e);
                    break;
                }
                tokio::time::sleep(self.scroll_pause).await;
                scrolls += 1;
            }
        }

        match session.execute(scripts::CLICK_SEE_MORE).await {
            Ok(_) => tokio::time::sleep(self.loading_pause).await,
            Err(e) => tracing::debug!("No expandable section: {}", e),
        }
    }

    async fn read_skills(&self, session: &mut dyn BrowserSession) -> Vec<String> {
        match session.execute(scripts::CLICK_ADDITIONAL_SKILLS).await {
            Ok(_) => tokio::time::sleep(self.loading_pause).await,
            Err(e) => tracing::debug!("Additional skills not expanded: {}", e),
        }

        match session.execute(scripts::READ_SKILLS).await {
            Ok(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|skill| !skill.is_empty())
                .map(str::to_string)
                .collect(),
            Ok(_) => Vec::new(),
            Err(e) => {
                tracing::debug!("Skills not found: {}", e);
                Vec::new()
            }
        }
    }
}

/// Builds a job, preferring company-page data over the inline text when
/// the company page provided a value
async fn build_job(
    session: &mut dyn BrowserSession,
    cache: &mut CompanyCache,
    raw: RawJobEntry,
) -> Job {
    let record = cache.resolve(session, &raw.company_link).await;

    let name = prefer(record.name, raw.inline_company);
    let location = prefer(record.location, raw.inline_location);

    Job {
        company: Company::new(name, record.industry),
        position: raw.title.unwrap_or_else(not_available),
        location: if is_not_available(&location) {
            Location::default()
        } else {
            Location::parse(&location)
        },
        daterange: raw.daterange.unwrap_or_else(not_available),
    }
}

fn prefer(resolved: String, inline: Option<String>) -> String {
    if !is_not_available(&resolved) {
        return resolved.trim().to_string();
    }
    inline
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(not_available)
}

fn as_pixels(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}
