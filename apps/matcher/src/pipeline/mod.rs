//! Per-user matching run: filter → match → rank.
//!
//! Pairs are matched one at a time. A dependency failure on one job is logged
//! and the job skipped; retrying is left to whoever reruns the pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::filtering::{FilterDecision, JobFilter, UnknownExperiencePolicy};
use crate::matching::{JobMatcher, MatchResult};
use crate::models::job::JobPosting;
use crate::models::user::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    /// Fit; queued for the recommendation email.
    ReadyForEmail,
    NotRecommended,
}

/// One scored job for one user.
#[derive(Debug, Clone, Serialize)]
pub struct JobMatch {
    pub user_id: String,
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub job_url: String,
    pub result: MatchResult,
    pub status: MatchStatus,
    pub matcher_backend: String,
    pub matched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub considered: usize,
    pub filtered_out: usize,
    pub matched: usize,
    pub failed: usize,
    pub fits: usize,
}

/// Filters, matches, and ranks `jobs` for `profile`. Output is sorted by
/// score, highest first; ties keep input order.
pub async fn run_matching(
    matcher: &dyn JobMatcher,
    unknown_policy: UnknownExperiencePolicy,
    profile: &UserProfile,
    jobs: &[JobPosting],
) -> Result<(Vec<JobMatch>, RunSummary), AppError> {
    info!(
        "Starting job matching for user {} over {} jobs ({} matcher)",
        profile.user_id,
        jobs.len(),
        matcher.backend()
    );

    let filter = JobFilter::new(profile.preferences.as_ref(), unknown_policy);
    let mut summary = RunSummary {
        considered: jobs.len(),
        ..Default::default()
    };
    let mut matches = Vec::new();

    for job in jobs {
        if let FilterDecision::Reject(_) = filter.evaluate(job) {
            summary.filtered_out += 1;
            continue;
        }

        let result = match matcher.match_job(&job.description, &profile.resume).await {
            Ok(result) => result,
            Err(e) if e.is_dependency_failure() => {
                error!("Failed to match job {} for user {}: {e}", job.id, profile.user_id);
                summary.failed += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        let status = if result.fit() {
            summary.fits += 1;
            MatchStatus::ReadyForEmail
        } else {
            MatchStatus::NotRecommended
        };
        summary.matched += 1;

        matches.push(JobMatch {
            user_id: profile.user_id.clone(),
            job_id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            job_url: job.job_url.clone(),
            result,
            status,
            matcher_backend: matcher.backend().to_string(),
            matched_at: Utc::now(),
        });
    }

    matches.sort_by(|a, b| b.result.score().total_cmp(&a.result.score()));

    info!(
        "Finished job matching for user {}: {} matched, {} fit, {} filtered out, {} failed",
        profile.user_id, summary.matched, summary.fits, summary.filtered_out, summary.failed
    );

    Ok((matches, summary))
}
