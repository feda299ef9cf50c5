//! Sequential processing of one partition
//!
//! A worker owns a single browser session for its whole run. Entries are
//! processed strictly in order and each produces exactly one result. The
//! only early stop is an abandoned recovery, which ends the partition and
//! marks it interrupted.

mod errlog;

pub use errlog::ErrorLog;

use crate::browser::{login, BrowserSession, SessionFactory};
use crate::cache::CompanyCache;
use crate::config::Config;
use crate::extract::{Extraction, ProfileExtractor};
use crate::input::parse_entry;
use crate::model::{FailureKind, ScrapingResult};
use crate::notify::Notifier;
use crate::recovery::{RecoveryMachine, RecoveryState};
use crate::Result;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Final outcome of one entry
enum EntryOutcome {
    Done(ScrapingResult),
    Abandoned,
}

/// What a worker hands back to the orchestrator
#[derive(Debug, Clone)]
pub struct WorkerReport {
    pub id: usize,
    pub results: Vec<ScrapingResult>,
    pub interrupted: bool,
    pub company_page_loads: usize,
}

/// Processes one partition of entries on its own browser session
pub struct Worker {
    id: usize,
    entries: Vec<String>,
    config: Arc<Config>,
    headless: bool,
    extractor: ProfileExtractor,
    cache: CompanyCache,
    recovery: RecoveryMachine,
    error_log: ErrorLog,
    notifier: Arc<dyn Notifier>,
    results: Vec<ScrapingResult>,
    interrupted: bool,
}

impl Worker {
    /// Creates a worker for `entries`
    ///
    /// Headless workers abandon their partition on the first challenge;
    /// interactive workers wait for the operator instead.
    pub fn new(
        id: usize,
        entries: Vec<String>,
        config: Arc<Config>,
        headless: bool,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            id,
            extractor: ProfileExtractor::new(&config.site, &config.scraper),
            error_log: ErrorLog::new(&config.output.error_log),
            results: Vec::with_capacity(entries.len()),
            entries,
            config,
            headless,
            cache: CompanyCache::new(),
            recovery: RecoveryMachine::new(!headless),
            notifier,
            interrupted: false,
        }
    }

    /// Runs the partition to completion or abandonment
    ///
    /// The session is quit on every path. If no session can be opened,
    /// every entry is recorded as a generic error.
    pub async fn run(mut self, factory: &dyn SessionFactory) -> WorkerReport {
        match factory.open(self.headless).await {
            Ok(mut session) => {
                self.run_with_session(session.as_mut()).await;
                if let Err(e) = session.quit().await {
                    tracing::warn!("Scraper #{}: failed to close browser: {}", self.id, e);
                }
            }
            Err(e) => {
                tracing::error!("Scraper #{}: failed to open browser: {}", self.id, e);
                for entry in &self.entries {
                    self.error_log.record(self.id, entry, &e);
                }
                let failed = ScrapingResult::Error(FailureKind::Generic);
                self.results = vec![failed; self.entries.len()];
            }
        }

        WorkerReport {
            id: self.id,
            company_page_loads: self.cache.page_loads(),
            results: self.results,
            interrupted: self.interrupted,
        }
    }

    async fn run_with_session(&mut self, session: &mut dyn BrowserSession) {
        if let Err(e) = login(session, &self.config.site, &self.config.account).await {
            tracing::warn!("Scraper #{}: login failed: {}", self.id, e);
        }

        let entries = std::mem::take(&mut self.entries);
        let total = entries.len();
        let started = Instant::now();

        for (index, line) in entries.iter().enumerate() {
            tracing::info!(
                "Scraper #{}: Scraping profile {} / {} - {} left",
                self.id,
                index + 1,
                total,
                eta(started.elapsed(), index, total)
            );

            let outcome = AssertUnwindSafe(self.process_entry(session, line))
                .catch_unwind()
                .await;

            match outcome {
                Ok(Ok(EntryOutcome::Done(result))) => self.results.push(result),
                Ok(Ok(EntryOutcome::Abandoned)) => {
                    tracing::warn!(
                        "Scraper #{}: human check required in headless mode, stopping after {} / {}",
                        self.id,
                        index + 1,
                        total
                    );
                    self.results.push(FailureKind::TerminatedDueToHumanCheck.into());
                    self.interrupted = true;
                    break;
                }
                Ok(Err(e)) => {
                    tracing::error!("Scraper #{}: error on {}: {}", self.id, line, e);
                    self.error_log.record(self.id, line, &e);
                    self.recovery.reset();
                    self.results.push(FailureKind::Generic.into());
                }
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    tracing::error!("Scraper #{}: panic on {}: {}", self.id, line, message);
                    self.error_log.record(self.id, line, &message);
                    self.recovery.reset();
                    self.results.push(FailureKind::Generic.into());
                }
            }
        }

        tracing::info!(
            "Scraper #{}: Parsed {} / {} profiles in {}",
            self.id,
            self.results.len(),
            total,
            format_hms(started.elapsed())
        );
    }

    /// Extracts one entry, retrying after every resolved challenge
    async fn process_entry(
        &mut self,
        session: &mut dyn BrowserSession,
        line: &str,
    ) -> Result<EntryOutcome> {
        let entry = parse_entry(line, &self.config.scraper.delimiter)?;

        loop {
            let extraction = self
                .extractor
                .extract(session, &mut self.cache, &entry.address, entry.graduation)
                .await?;

            let landed = match extraction {
                Extraction::Finished(result) => return Ok(EntryOutcome::Done(result)),
                Extraction::Challenge { landed } => landed,
            };

            tracing::warn!(
                "Scraper #{}: challenge while opening {} (landed on {})",
                self.id,
                entry.address,
                landed
            );

            let state = self
                .recovery
                .handle_challenge(
                    session,
                    &self.config.site,
                    &self.config.account,
                    self.notifier.as_ref(),
                    self.config.scraper.manual_check_poll(),
                )
                .await?;

            if state == RecoveryState::Abandoned {
                return Ok(EntryOutcome::Abandoned);
            }
            self.recovery.resume()?;
        }
    }
}

/// Estimated time left before entry `done + 1` of `total`
fn eta(elapsed: Duration, done: usize, total: usize) -> String {
    if done == 0 {
        return "Unknown time".to_string();
    }
    let per_entry = elapsed / done as u32;
    format_hms(per_entry * (total - done) as u32)
}

/// Formats a duration as HH:MM:SS
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}
