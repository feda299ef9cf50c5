//! End-to-end scraping scenarios

use crate::support::*;
use chrono::NaiveDate;
use profile_scraper::browser::SessionFactory;
use profile_scraper::cache::CompanyCache;
use profile_scraper::extract::{Extraction, ProfileExtractor};
use profile_scraper::model::{FailureKind, Job, ScrapingResult};
use profile_scraper::notify::{Notifier, MANUAL_CHECK_MESSAGE};
use profile_scraper::{run_scrape, Worker};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const JDOE: &str = "https://example.com/in/jdoe/";
const ACME: &str = "https://example.com/company/acme/";

fn acme_job(title: &'static str, daterange: &'static str) -> JobFixture {
    JobFixture {
        title,
        company_href: "/company/acme/",
        company_inline: "Acme Full-time",
        daterange,
        location: "Somewhere, Earth",
    }
}

fn career_profile(name: &'static str) -> ProfileFixture {
    ProfileFixture {
        name: Some(name),
        email: Some("jdoe@example.com"),
        skills: vec!["Rust", "SQL"],
        jobs: vec![
            acme_job("Engineer", "Jun 2020 – Present"),
            JobFixture {
                title: "Intern",
                company_href: "/school/poli/",
                company_inline: "Initech",
                daterange: "Jan 2019 – Dec 2019",
                location: "Turin, Italy",
            },
        ],
        education: vec![("Politecnico", "MSc", "Computer Science", "2017", "2019")],
        ..ProfileFixture::default()
    }
}

fn notifier() -> Arc<RecordingNotifier> {
    Arc::new(RecordingNotifier::default())
}

async fn run_worker(
    site: &FakeSite,
    dir: &TempDir,
    entries: &[&str],
    headless: bool,
) -> profile_scraper::worker::WorkerReport {
    let config = Arc::new(test_config(dir.path(), 1));
    let entries = entries.iter().map(|e| e.to_string()).collect();
    let notifier: Arc<dyn Notifier> = notifier();
    let worker = Worker::new(1, entries, config, headless, notifier);
    worker.run(site.factory().as_ref()).await
}

fn profile_of(result: &ScrapingResult) -> &profile_scraper::Profile {
    result.profile().expect("expected a profile outcome")
}

#[tokio::test]
async fn test_unavailable_profile_after_normalization() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::new().redirect(JDOE, UNAVAILABLE_URL);

    let report = run_worker(&site, &dir, &["https://example.com/in/jdoe"], true).await;

    assert_eq!(
        report.results,
        vec![ScrapingResult::Error(FailureKind::ProfileUnavailable)]
    );
    assert_eq!(site.visits(JDOE), 1);
    assert!(!report.interrupted);
}

#[tokio::test]
async fn test_graduation_date_drives_history_summary() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::new()
        .profile(JDOE, career_profile("Jane Doe"))
        .company(ACME, company_html("Acme Corporation", "Software", "Milan, Italy"));

    let report = run_worker(&site, &dir, &["https://example.com/in/jdoe:::01/01/20"], true).await;

    let profile = profile_of(&report.results[0]);
    assert_eq!(profile.profile_name(), "Jane Doe");
    assert_eq!(profile.email(), "jdoe@example.com");
    assert_eq!(profile.skills(), &["Rust".to_string(), "SQL".to_string()]);

    let summary = profile.jobs_history();
    assert_eq!(summary.is_working_while_studying, Some(true));
    assert_eq!(summary.months_to_first_job, Some(5));
    assert_eq!(summary.first_job_date, NaiveDate::from_ymd_opt(2019, 1, 1));
    assert!(!summary.is_currently_unemployed);

    let current = profile.current_job();
    assert_eq!(current.company.name, "Acme Corporation");
    assert_eq!(current.company.industry, "Software");
    assert_eq!(current.location.city, "Milan");
    assert_eq!(current.position, "Engineer");

    // Non-company links keep the inline text
    let intern = &profile.job_list()[1];
    assert_eq!(intern.company.name, "Initech");
    assert_eq!(intern.company.industry, "N/A");
    assert_eq!(intern.location.full_string, "Turin, Italy");

    assert_eq!(profile.edu_list()[0].degreename, "MSc");
    assert_eq!(profile.edu_list()[0].end_year, "2019");
}

#[tokio::test]
async fn test_company_resolved_once_per_worker() {
    let dir = TempDir::new().unwrap();
    let mut fixture = career_profile("Jane Doe");
    fixture.jobs = vec![
        acme_job("Engineer", "Jun 2020 – Present"),
        JobFixture {
            company_href: "/company/acme/life/?trk=profile",
            ..acme_job("Junior Engineer", "Jan 2019 – May 2020")
        },
    ];
    let site = FakeSite::new()
        .profile(JDOE, fixture)
        .profile("https://example.com/in/asmith/", {
            let mut other = career_profile("Alex Smith");
            other.jobs = vec![acme_job("Manager", "2015 – Present")];
            other
        })
        .company(ACME, company_html("Acme Corporation", "Software", "Milan, Italy"));

    let report = run_worker(
        &site,
        &dir,
        &["https://example.com/in/jdoe", "https://example.com/in/asmith"],
        true,
    )
    .await;

    let jobs = profile_of(&report.results[0]).job_list();
    assert_eq!(jobs[0].company, jobs[1].company);
    assert_eq!(jobs[0].location, jobs[1].location);
    assert_eq!(
        profile_of(&report.results[1]).job_list()[0].company,
        jobs[0].company
    );

    assert_eq!(site.visits(ACME), 1);
    assert_eq!(report.company_page_loads, 1);
}

#[tokio::test]
async fn test_headless_challenge_abandons_partition() {
    let dir = TempDir::new().unwrap();
    let addresses: Vec<String> = (1..=5)
        .map(|i| format!("https://example.com/in/user{}/", i))
        .collect();
    let names = ["One", "Two", "Three", "Four", "Five"];

    let mut site = FakeSite::new().challenge(&addresses[2], usize::MAX);
    for (address, name) in addresses.iter().zip(names) {
        site = site.profile(address, ProfileFixture::named(name));
    }

    let entries: Vec<&str> = addresses.iter().map(String::as_str).collect();
    let report = run_worker(&site, &dir, &entries, true).await;

    assert!(report.interrupted);
    assert_eq!(report.results.len(), 3);
    assert_eq!(profile_of(&report.results[0]).profile_name(), "One");
    assert_eq!(profile_of(&report.results[1]).profile_name(), "Two");
    assert_eq!(
        report.results[2],
        ScrapingResult::Error(FailureKind::TerminatedDueToHumanCheck)
    );
    assert_eq!(site.visits(&addresses[3]), 0);
    assert_eq!(site.visits(&addresses[4]), 0);
    assert_eq!(site.visits(LOGOUT_URL), 0);
    assert_eq!(site.lock().sessions_quit, 1);
}

#[tokio::test]
async fn test_interactive_challenge_resumes_entry() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::new()
        .profile(JDOE, ProfileFixture::named("Jane Doe"))
        .challenge(JDOE, 1);

    let report = run_worker(&site, &dir, &[JDOE], false).await;

    assert!(!report.interrupted);
    assert_eq!(profile_of(&report.results[0]).profile_name(), "Jane Doe");
    assert_eq!(site.visits(JDOE), 2);
    assert_eq!(site.visits(LOGOUT_URL), 1);
    // Initial login plus the one after logout
    assert_eq!(site.visits(LOGIN_URL), 2);
}

#[tokio::test]
async fn test_interactive_challenge_prompts_until_landing() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path(), 1);
    config.scraper.manual_check_poll_secs = 0;

    let site = FakeSite::new()
        .profile(JDOE, ProfileFixture::named("Jane Doe"))
        .challenge(JDOE, 1)
        .manual_check_polls(2);

    let notifier = Arc::new(RecordingNotifier::default());
    let worker = Worker::new(
        1,
        vec![JDOE.to_string()],
        Arc::new(config),
        false,
        notifier.clone(),
    );
    let report = worker.run(site.factory().as_ref()).await;

    assert!(!report.interrupted);
    assert_eq!(profile_of(&report.results[0]).profile_name(), "Jane Doe");
    assert_eq!(
        *notifier.messages.lock().unwrap(),
        vec![MANUAL_CHECK_MESSAGE.to_string(); 2]
    );
    assert_eq!(site.visits(JDOE), 2);
}

#[tokio::test]
async fn test_skills_read_after_expansion_settles() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path(), 1);
    config.scraper.loading_pause_ms = 50;

    let mut fixture = ProfileFixture::named("Jane Doe");
    fixture.skills = vec!["Rust"];
    fixture.additional_skills = vec!["SQL", "Docker"];
    let site = FakeSite::new()
        .profile(JDOE, fixture)
        .skills_render_delay(Duration::from_millis(40));

    let mut session = site.factory().open(true).await.unwrap();
    let extractor = ProfileExtractor::new(&config.site, &config.scraper);
    let extraction = extractor
        .extract(session.as_mut(), &mut CompanyCache::new(), JDOE, None)
        .await
        .unwrap();

    let result = match extraction {
        Extraction::Finished(result) => result,
        other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(
        profile_of(&result).skills(),
        &["Rust".to_string(), "SQL".to_string(), "Docker".to_string()]
    );
}

#[tokio::test]
async fn test_bad_link_is_not_navigated() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::new();

    let report = run_worker(&site, &dir, &["not a link", "ftp//broken"], true).await;

    assert_eq!(
        report.results,
        vec![
            ScrapingResult::Error(FailureKind::BadFormattedLink),
            ScrapingResult::Error(FailureKind::BadFormattedLink),
        ]
    );
    assert_eq!(site.lock().navigations, vec![LOGIN_URL.to_string()]);
}

#[tokio::test]
async fn test_missing_name_fails_profile() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::new().profile(JDOE, ProfileFixture::default());

    let report = run_worker(&site, &dir, &[JDOE], true).await;

    assert_eq!(
        report.results,
        vec![ScrapingResult::Error(FailureKind::NameNotFound)]
    );
}

#[tokio::test]
async fn test_profile_without_jobs_uses_sentinels() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::new().profile(JDOE, ProfileFixture::named("Jane Doe"));

    let report = run_worker(&site, &dir, &[JDOE], true).await;

    let profile = profile_of(&report.results[0]);
    assert_eq!(profile.email(), "N/A");
    assert!(profile.skills().is_empty());
    assert_eq!(profile.job_list(), &[Job::default()]);
    assert_eq!(profile.edu_list().len(), 1);
    assert_eq!(profile.edu_list()[0].institution, "N/A");
    assert_eq!(profile.current_job(), &Job::default());
}

#[tokio::test]
async fn test_unemployed_profile_has_sentinel_current_job() {
    let dir = TempDir::new().unwrap();
    let mut fixture = ProfileFixture::named("Jane Doe");
    fixture.jobs = vec![acme_job("Engineer", "Jan 2019 – Dec 2021")];
    let site = FakeSite::new()
        .profile(JDOE, fixture)
        .company(ACME, company_html("Acme Corporation", "Software", "Milan, Italy"));

    let report = run_worker(&site, &dir, &[JDOE], true).await;

    let profile = profile_of(&report.results[0]);
    assert!(profile.jobs_history().is_currently_unemployed);
    assert_eq!(profile.current_job(), &Job::default());
    assert_eq!(profile.job_list()[0].company.name, "Acme Corporation");
}

#[tokio::test]
async fn test_unexpected_failures_are_logged_and_isolated() {
    let dir = TempDir::new().unwrap();
    let crashing = "https://example.com/in/crash/";
    let site = FakeSite::new()
        .profile(crashing, ProfileFixture::named("Crash"))
        .profile(JDOE, ProfileFixture::named("Jane Doe"))
        .panic_on(crashing);

    let report = run_worker(
        &site,
        &dir,
        &[crashing, "https://example.com/in/jdoe:::31/31/20", JDOE],
        true,
    )
    .await;

    assert_eq!(report.results.len(), 3);
    assert_eq!(report.results[0], ScrapingResult::Error(FailureKind::Generic));
    assert_eq!(report.results[1], ScrapingResult::Error(FailureKind::Generic));
    assert_eq!(profile_of(&report.results[2]).profile_name(), "Jane Doe");
    assert!(!report.interrupted);

    let log = std::fs::read_to_string(dir.path().join("errlog.txt")).unwrap();
    assert!(log.contains("renderer crashed"));
    assert!(log.contains("31/31/20"));
}

#[tokio::test]
async fn test_extraction_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path(), 1);
    let site = FakeSite::new()
        .profile(JDOE, career_profile("Jane Doe"))
        .company(ACME, company_html("Acme Corporation", "Software", "Milan, Italy"));

    let mut session = site.factory().open(true).await.unwrap();
    let extractor = ProfileExtractor::new(&config.site, &config.scraper);
    let graduation = NaiveDate::from_ymd_opt(2020, 1, 1);

    let mut cache = CompanyCache::new();
    let first = extractor
        .extract(session.as_mut(), &mut cache, JDOE, graduation)
        .await
        .unwrap();

    let mut fresh_cache = CompanyCache::new();
    let second = extractor
        .extract(session.as_mut(), &mut fresh_cache, JDOE, graduation)
        .await
        .unwrap();

    assert!(matches!(first, Extraction::Finished(ScrapingResult::Profile(_))));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_orchestrator_preserves_partition_order() {
    let dir = TempDir::new().unwrap();
    let config = Arc::new(test_config(dir.path(), 3));
    let names = ["A", "B", "C", "D", "E", "F", "G"];

    let mut site = FakeSite::new().redirect("https://example.com/in/e/", UNAVAILABLE_URL);
    let mut entries = Vec::new();
    for name in names {
        let address = format!("https://example.com/in/{}/", name.to_lowercase());
        site = site.profile(&address, ProfileFixture::named(name));
        entries.push(address);
    }

    let notifier: Arc<dyn Notifier> = notifier();
    let report = run_scrape(config, entries, true, site.factory(), notifier).await;

    assert!(!report.interrupted);
    assert_eq!(report.workers.len(), 3);
    let sizes: Vec<usize> = report.workers.iter().map(|w| w.results.len()).collect();
    assert_eq!(sizes, vec![3, 2, 2]);

    let outcomes: Vec<String> = report
        .results
        .iter()
        .map(|r| match r {
            ScrapingResult::Profile(p) => p.profile_name().to_string(),
            ScrapingResult::Error(kind) => kind.to_string(),
        })
        .collect();
    assert_eq!(
        outcomes,
        vec!["A", "B", "C", "D", "ProfileUnavailable", "F", "G"]
    );

    let state = site.lock();
    assert_eq!(state.sessions_opened, 3);
    assert_eq!(state.sessions_quit, 3);
}

#[tokio::test]
async fn test_orchestrator_reports_interruption_of_one_partition() {
    let dir = TempDir::new().unwrap();
    let config = Arc::new(test_config(dir.path(), 2));

    let mut site = FakeSite::new();
    let mut entries = Vec::new();
    for i in 1..=4 {
        let address = format!("https://example.com/in/p{}/", i);
        site = site.profile(&address, ProfileFixture::named("Someone"));
        entries.push(address);
    }
    site = site.challenge(&entries[0], usize::MAX);

    let notifier: Arc<dyn Notifier> = notifier();
    let report = run_scrape(config, entries, true, site.factory(), notifier).await;

    assert!(report.interrupted);
    assert!(report.workers[0].interrupted);
    assert!(!report.workers[1].interrupted);
    assert_eq!(report.results.len(), 3);
    assert_eq!(
        report.results[0],
        ScrapingResult::Error(FailureKind::TerminatedDueToHumanCheck)
    );
    assert!(!report.results[1].is_error());
    assert!(!report.results[2].is_error());
}

#[tokio::test]
async fn test_interactive_run_uses_single_partition() {
    let dir = TempDir::new().unwrap();
    let config = Arc::new(test_config(dir.path(), 4));
    let site = FakeSite::new()
        .profile(JDOE, ProfileFixture::named("Jane Doe"))
        .redirect("https://example.com/in/gone/", UNAVAILABLE_URL);

    let entries = vec![JDOE.to_string(), "https://example.com/in/gone/".to_string()];
    let notifier: Arc<dyn Notifier> = notifier();
    let report = run_scrape(config, entries, false, site.factory(), notifier).await;

    assert_eq!(report.workers.len(), 1);
    assert_eq!(report.results.len(), 2);
    assert_eq!(site.lock().sessions_opened, 1);
}
