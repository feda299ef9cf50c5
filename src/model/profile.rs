use crate::model::{Education, Job, JobHistorySummary};
use std::fmt;

/// A fully extracted profile
///
/// `job_list` and `edu_list` are never empty: absent entries are replaced by
/// a single default record. `current_job` is the default job whenever the
/// history summary marks the subject as currently unemployed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    profile_name: String,
    email: String,
    skills: Vec<String>,
    current_job: Job,
    jobs_history: JobHistorySummary,
    job_list: Vec<Job>,
    edu_list: Vec<Education>,
}

impl Profile {
    /// Creates a profile with no career data
    pub fn new(profile_name: String, email: String, skills: Vec<String>) -> Self {
        Self::with_career(
            profile_name,
            email,
            skills,
            Vec::new(),
            JobHistorySummary::default(),
            Vec::new(),
        )
    }

    /// Creates a profile with jobs (most recent first), their summary, and
    /// education entries
    pub fn with_career(
        profile_name: String,
        email: String,
        skills: Vec<String>,
        job_list: Vec<Job>,
        jobs_history: JobHistorySummary,
        edu_list: Vec<Education>,
    ) -> Self {
        let current_job = if jobs_history.is_currently_unemployed {
            Job::default()
        } else {
            job_list.first().cloned().unwrap_or_default()
        };

        let job_list = if job_list.is_empty() {
            vec![Job::default()]
        } else {
            job_list
        };

        let edu_list = if edu_list.is_empty() {
            vec![Education::default()]
        } else {
            edu_list
        };

        Self {
            profile_name,
            email,
            skills,
            current_job,
            jobs_history,
            job_list,
            edu_list,
        }
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn current_job(&self) -> &Job {
        &self.current_job
    }

    pub fn jobs_history(&self) -> &JobHistorySummary {
        &self.jobs_history
    }

    /// Jobs, most recent first. Never empty.
    pub fn job_list(&self) -> &[Job] {
        &self.job_list
    }

    /// Education entries in page order. Never empty.
    pub fn edu_list(&self) -> &[Education] {
        &self.edu_list
    }
}

/// Reasons an entry produced no profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The entry address is not a well-formed URL
    BadFormattedLink,

    /// The site redirected to its "profile removed" page
    ProfileUnavailable,

    /// The display name could not be read
    NameNotFound,

    /// A challenge occurred while no human could resolve it
    TerminatedDueToHumanCheck,

    /// Any unanticipated failure while processing the entry
    Generic,
}

impl FailureKind {
    /// Returns the error marker written to the export
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadFormattedLink => "BadFormattedLink",
            Self::ProfileUnavailable => "ProfileUnavailable",
            Self::NameNotFound => "ERROR IN SCRAPING NAME",
            Self::TerminatedDueToHumanCheck => "TerminatedDueToHumanCheckError",
            Self::Generic => "GenericError",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scraping one entry: a profile or an error marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapingResult {
    Profile(Box<Profile>),
    Error(FailureKind),
}

impl ScrapingResult {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Profile(profile) => Some(profile),
            Self::Error(_) => None,
        }
    }

    /// The error marker, if this is an error outcome
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Profile(_) => None,
            Self::Error(kind) => Some(kind.as_str()),
        }
    }
}

impl From<Profile> for ScrapingResult {
    fn from(profile: Profile) -> Self {
        Self::Profile(Box::new(profile))
    }
}

impl From<FailureKind> for ScrapingResult {
    fn from(kind: FailureKind) -> Self {
        Self::Error(kind)
    }
}
