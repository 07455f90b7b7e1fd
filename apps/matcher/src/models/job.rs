use serde::{Deserialize, Serialize};

use crate::experience::ExperienceEstimate;

/// A scraped job posting after ingest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub site: String,
    pub job_url: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub date_posted: String,
    pub job_level: String,
    pub description: String,
    pub min_exp_required: ExperienceEstimate,
}
