//! CSV export of scraping results
//!
//! One row per result, in result order. Profile rows describe the current
//! job, the overall job span and the last education entry. Error rows carry
//! `Error_<marker>` in every column so that failed entries stay visible.

use crate::config::OutputConfig;
use crate::model::{Profile, ScrapingResult, NOT_AVAILABLE};
use crate::Result;
use std::path::{Path, PathBuf};

/// Column headers, in order
pub const HEADERS: [&str; 14] = [
    "Name",
    "Email",
    "Skills",
    "Company",
    "Industry",
    "Job Title",
    "Location",
    "DATE FIRST JOB",
    "DATE LAST JOB",
    "DATE FIRST GRADUATION",
    "education",
    "institution",
    "WORKING WHILE STUDYING",
    "MONTHS TO FIRST JOB",
];

/// Writes all results to a CSV file, replacing any existing file
pub fn write_export(path: &Path, results: &[ScrapingResult]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADERS)?;

    for result in results {
        writer.write_record(record(result))?;
    }

    writer.flush()?;
    tracing::info!("Wrote {} rows to {}", results.len(), path.display());
    Ok(())
}

/// Builds the export row for one result
pub fn record(result: &ScrapingResult) -> Vec<String> {
    match result {
        ScrapingResult::Profile(profile) => profile_record(profile),
        ScrapingResult::Error(kind) => vec![format!("Error_{}", kind); HEADERS.len()],
    }
}

fn profile_record(p: &Profile) -> Vec<String> {
    let current = p.current_job();
    let summary = p.jobs_history();

    // Lists are never empty, but the sentinel keeps this total
    let first_job = p.job_list().last().map(|j| j.daterange.as_str());
    let last_job = p.job_list().first().map(|j| j.daterange.as_str());
    let education = p.edu_list().last();

    vec![
        p.profile_name().to_string(),
        p.email().to_string(),
        p.skills().join(","),
        current.company.name.clone(),
        current.company.industry.clone(),
        current.position.clone(),
        current.location.full_string.clone(),
        first_job.unwrap_or(NOT_AVAILABLE).to_string(),
        last_job.unwrap_or(NOT_AVAILABLE).to_string(),
        education.map_or(NOT_AVAILABLE, |e| e.end_year.as_str()).to_string(),
        education.map_or_else(
            || NOT_AVAILABLE.to_string(),
            |e| format!("{}, {}", e.degreename, e.field),
        ),
        education.map_or(NOT_AVAILABLE, |e| e.institution.as_str()).to_string(),
        flag(summary.is_working_while_studying),
        summary
            .months_to_first_job
            .map_or_else(|| NOT_AVAILABLE.to_string(), |m| m.to_string()),
    ]
}

fn flag(value: Option<bool>) -> String {
    match value {
        Some(true) => "X".to_string(),
        Some(false) => String::new(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Resolves the export path, inserting `_<unix seconds>` before the
/// extension when timestamping is enabled
pub fn output_path(output: &OutputConfig, unix_seconds: i64) -> PathBuf {
    let path = PathBuf::from(&output.output_file);
    if !output.append_timestamp {
        return path;
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, unix_seconds, ext.to_string_lossy()),
        None => format!("{}_{}", stem, unix_seconds),
    };
    path.with_file_name(name)
}
