//! Pre-match job filter driven by the user's preferences.
//!
//! Filtering is cheap and runs before any embedding call, so rejected jobs
//! never reach a matcher.

use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::experience::ExperienceEstimate;
use crate::models::job::JobPosting;
use crate::models::user::UserPreferences;

/// What to do with a job whose experience requirement could not be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownExperiencePolicy {
    /// Drop the job.
    #[default]
    Exclude,
    /// Treat it as requiring no experience.
    TreatAsZero,
}

impl FromStr for UnknownExperiencePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclude" => Ok(UnknownExperiencePolicy::Exclude),
            "zero" | "treat_as_zero" => Ok(UnknownExperiencePolicy::TreatAsZero),
            other => {
                bail!("UNKNOWN_EXPERIENCE_POLICY must be 'exclude' or 'zero', got '{other}'")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    Keep,
    Reject(String),
}

impl FilterDecision {
    pub fn is_keep(&self) -> bool {
        matches!(self, FilterDecision::Keep)
    }
}

/// Lower-cased copy of the preferences, built once per user.
#[derive(Debug, Clone)]
pub struct JobFilter {
    unknown_policy: UnknownExperiencePolicy,
    min_experience: Option<u32>,
    max_experience: Option<u32>,
    roles: Vec<String>,
    locations: Vec<String>,
    avoid_companies: Vec<String>,
    remote_only: bool,
    keywords: Vec<String>,
    blacklist_keywords: Vec<String>,
}

fn lowered(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl JobFilter {
    pub fn new(
        preferences: Option<&UserPreferences>,
        unknown_policy: UnknownExperiencePolicy,
    ) -> Self {
        let empty = UserPreferences::default();
        let prefs = preferences.unwrap_or(&empty);
        Self {
            unknown_policy,
            min_experience: prefs.min_experience,
            max_experience: prefs.max_experience,
            roles: lowered(&prefs.preferred_roles),
            locations: lowered(&prefs.preferred_locations),
            avoid_companies: lowered(&prefs.avoid_companies),
            remote_only: prefs.remote_only,
            keywords: lowered(&prefs.keywords),
            blacklist_keywords: lowered(&prefs.blacklist_keywords),
        }
    }

    pub fn evaluate(&self, job: &JobPosting) -> FilterDecision {
        let decision = self.decide(job);
        if let FilterDecision::Reject(reason) = &decision {
            debug!("Filtered out job {} ({}): {}", job.id, job.title, reason);
        }
        decision
    }

    fn decide(&self, job: &JobPosting) -> FilterDecision {
        let years = match (job.min_exp_required, self.unknown_policy) {
            (ExperienceEstimate::Known(years), _) => years,
            (ExperienceEstimate::Unknown, UnknownExperiencePolicy::TreatAsZero) => 0,
            (ExperienceEstimate::Unknown, UnknownExperiencePolicy::Exclude) => {
                return FilterDecision::Reject("experience requirement unknown".to_string());
            }
        };

        if let Some(max) = self.max_experience {
            if years > max {
                return FilterDecision::Reject(format!("requires {years} years, max is {max}"));
            }
        }
        if let Some(min) = self.min_experience {
            if years < min {
                return FilterDecision::Reject(format!("requires {years} years, min is {min}"));
            }
        }

        let title = job.title.to_lowercase();
        if !self.roles.is_empty() && !self.roles.iter().any(|r| title.contains(r.as_str())) {
            return FilterDecision::Reject(format!("title '{}' not a preferred role", job.title));
        }

        let location = job.location.to_lowercase();
        if !self.locations.is_empty()
            && !self.locations.iter().any(|l| location.contains(l.as_str()))
        {
            return FilterDecision::Reject(format!("location '{}' not preferred", job.location));
        }

        let company = job.company.trim().to_lowercase();
        if self.avoid_companies.iter().any(|c| *c == company) {
            return FilterDecision::Reject(format!("company '{}' is avoided", job.company));
        }

        let description = job.description.to_lowercase();
        if self.remote_only && !location.contains("remote") && !description.contains("remote") {
            return FilterDecision::Reject("not remote".to_string());
        }

        if let Some(missing) = self.keywords.iter().find(|k| !description.contains(k.as_str())) {
            return FilterDecision::Reject(format!("missing keyword '{missing}'"));
        }

        if let Some(hit) = self
            .blacklist_keywords
            .iter()
            .find(|k| description.contains(k.as_str()))
        {
            return FilterDecision::Reject(format!("blacklisted keyword '{hit}'"));
        }

        FilterDecision::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_job(
        location: &str,
        company: &str,
        description: &str,
        exp: ExperienceEstimate,
    ) -> JobPosting {
        JobPosting {
            id: "job-1".to_string(),
            site: "indeed".to_string(),
            job_url: "https://example.com/job-1".to_string(),
            title: "Data Analyst".to_string(),
            company: company.to_string(),
            location: location.to_string(),
            date_posted: "2025-01-01".to_string(),
            job_level: "Unavailable".to_string(),
            description: description.to_string(),
            min_exp_required: exp,
        }
    }

    fn prefs() -> UserPreferences {
        UserPreferences {
            preferred_locations: vec!["Mumbai".to_string(), "Pune".to_string()],
            max_experience: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn test_policy_parses() {
        assert_eq!(
            "exclude".parse::<UnknownExperiencePolicy>().unwrap(),
            UnknownExperiencePolicy::Exclude
        );
        assert_eq!(
            "Zero".parse::<UnknownExperiencePolicy>().unwrap(),
            UnknownExperiencePolicy::TreatAsZero
        );
        assert!("maybe".parse::<UnknownExperiencePolicy>().is_err());
    }

    #[test]
    fn test_keeps_matching_job() {
        let filter = JobFilter::new(Some(&prefs()), UnknownExperiencePolicy::Exclude);
        let job = make_job("Mumbai, MH, IN", "Acme", "SQL and Excel", ExperienceEstimate::Known(2));
        assert_eq!(filter.evaluate(&job), FilterDecision::Keep);
    }

    #[test]
    fn test_rejects_above_max_experience() {
        let filter = JobFilter::new(Some(&prefs()), UnknownExperiencePolicy::Exclude);
        let job = make_job("Mumbai", "Acme", "", ExperienceEstimate::Known(5));
        assert!(!filter.evaluate(&job).is_keep());
    }

    #[test]
    fn test_rejects_below_min_experience() {
        let prefs = UserPreferences {
            min_experience: Some(1),
            ..Default::default()
        };
        let filter = JobFilter::new(Some(&prefs), UnknownExperiencePolicy::Exclude);
        let job = make_job("Anywhere", "Acme", "", ExperienceEstimate::Known(0));
        assert!(!filter.evaluate(&job).is_keep());
    }

    #[test]
    fn test_unknown_experience_policies() {
        let job = make_job("Pune", "Acme", "", ExperienceEstimate::Unknown);

        let exclude = JobFilter::new(Some(&prefs()), UnknownExperiencePolicy::Exclude);
        assert_eq!(
            exclude.evaluate(&job),
            FilterDecision::Reject("experience requirement unknown".to_string())
        );

        let zero = JobFilter::new(Some(&prefs()), UnknownExperiencePolicy::TreatAsZero);
        assert!(zero.evaluate(&job).is_keep());
    }

    #[test]
    fn test_location_is_case_insensitive_substring() {
        let filter = JobFilter::new(Some(&prefs()), UnknownExperiencePolicy::Exclude);
        assert!(filter
            .evaluate(&make_job("PUNE, India", "Acme", "", ExperienceEstimate::Known(1)))
            .is_keep());
        assert!(!filter
            .evaluate(&make_job("Delhi", "Acme", "", ExperienceEstimate::Known(1)))
            .is_keep());
    }

    #[test]
    fn test_avoided_company() {
        let prefs = UserPreferences {
            avoid_companies: vec!["Initech".to_string()],
            ..Default::default()
        };
        let filter = JobFilter::new(Some(&prefs), UnknownExperiencePolicy::Exclude);
        let job = make_job("Austin", " initech ", "", ExperienceEstimate::Known(1));
        assert!(!filter.evaluate(&job).is_keep());
    }

    #[test]
    fn test_preferred_roles_match_title() {
        let prefs = UserPreferences {
            preferred_roles: vec!["data analyst".to_string()],
            ..Default::default()
        };
        let filter = JobFilter::new(Some(&prefs), UnknownExperiencePolicy::Exclude);
        let job = make_job("NYC", "Acme", "", ExperienceEstimate::Known(1));
        assert!(filter.evaluate(&job).is_keep());

        let other = JobPosting {
            title: "Backend Engineer".to_string(),
            ..job
        };
        assert_eq!(
            filter.evaluate(&other),
            FilterDecision::Reject("title 'Backend Engineer' not a preferred role".to_string())
        );
    }

    #[test]
    fn test_remote_only() {
        let prefs = UserPreferences {
            remote_only: true,
            ..Default::default()
        };
        let filter = JobFilter::new(Some(&prefs), UnknownExperiencePolicy::Exclude);
        assert!(filter
            .evaluate(&make_job("Remote - US", "Acme", "", ExperienceEstimate::Known(1)))
            .is_keep());
        assert!(filter
            .evaluate(&make_job(
                "Boston",
                "Acme",
                "Fully remote team",
                ExperienceEstimate::Known(1)
            ))
            .is_keep());
        assert!(!filter
            .evaluate(&make_job("Boston", "Acme", "On-site only", ExperienceEstimate::Known(1)))
            .is_keep());
    }

    #[test]
    fn test_keywords_and_blacklist() {
        let prefs = UserPreferences {
            keywords: vec!["Python".to_string()],
            blacklist_keywords: vec!["security clearance".to_string()],
            ..Default::default()
        };
        let filter = JobFilter::new(Some(&prefs), UnknownExperiencePolicy::Exclude);

        let ok = make_job("NYC", "Acme", "Python and SQL", ExperienceEstimate::Known(2));
        assert!(filter.evaluate(&ok).is_keep());

        let missing = make_job("NYC", "Acme", "Java only", ExperienceEstimate::Known(2));
        assert_eq!(
            filter.evaluate(&missing),
            FilterDecision::Reject("missing keyword 'python'".to_string())
        );

        let blacklisted = make_job(
            "NYC",
            "Acme",
            "Python; active Security Clearance required",
            ExperienceEstimate::Known(2),
        );
        assert!(!filter.evaluate(&blacklisted).is_keep());
    }

    #[test]
    fn test_no_preferences_keeps_everything_known() {
        let filter = JobFilter::new(None, UnknownExperiencePolicy::Exclude);
        let job = make_job("Anywhere", "Acme", "", ExperienceEstimate::Known(12));
        assert!(filter.evaluate(&job).is_keep());
    }
}
