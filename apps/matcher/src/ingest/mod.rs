//! Ingest: turns loosely-typed scraped rows into `JobPosting`s.
//!
//! Scraper output is a JSON array of objects whose fields may be missing,
//! null, or the wrong type. Nothing here fails on a bad field.

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::experience::ExperienceExtractor;
use crate::models::job::JobPosting;

pub const UNAVAILABLE: &str = "Unavailable";

/// Missing or null → "Unavailable"; strings as-is; anything else as its JSON text.
pub fn safe_str(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNAVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// UUIDv5 over url + title, so the same posting scraped twice keeps its id.
pub fn stable_job_id(job_url: &str, title: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, format!("{job_url}{title}").as_bytes()).to_string()
}

pub fn ingest_job(row: &Value, extractor: &ExperienceExtractor) -> JobPosting {
    let field = |key: &str| safe_str(row.get(key));

    let job_url = field("job_url");
    let title = field("title");
    let id = match row.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
        _ => stable_job_id(&job_url, &title),
    };

    let description_value = row.get("description").unwrap_or(&Value::Null);
    let min_exp_required = extractor.extract_from_value(description_value);
    let description = match description_value {
        Value::String(s) => s.clone(),
        _ => String::new(),
    };

    JobPosting {
        id,
        site: field("site"),
        job_url,
        title,
        company: field("company"),
        location: field("location"),
        date_posted: field("date_posted"),
        job_level: field("job_level"),
        description,
        min_exp_required,
    }
}

/// Ingests every object in a JSON array; other rows are skipped.
pub fn ingest_jobs(rows: &Value, extractor: &ExperienceExtractor) -> Vec<JobPosting> {
    let Some(rows) = rows.as_array() else {
        warn!("Expected a JSON array of job rows; nothing ingested");
        return Vec::new();
    };

    let jobs: Vec<JobPosting> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            if row.is_object() {
                Some(ingest_job(row, extractor))
            } else {
                warn!("Skipping job row {index}: not a JSON object");
                None
            }
        })
        .collect();

    info!("Ingested {} of {} raw job rows", jobs.len(), rows.len());
    jobs
}
