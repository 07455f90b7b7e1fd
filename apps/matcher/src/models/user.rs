use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;

/// Personalized job preferences. Every field is optional; an unset field
/// never filters anything out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Keep only jobs whose title contains one of these.
    #[serde(default)]
    pub preferred_roles: Vec<String>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    /// Carried through for downstream consumers; not used for filtering.
    #[serde(default)]
    pub preferred_companies: Vec<String>,
    #[serde(default)]
    pub avoid_companies: Vec<String>,
    #[serde(default)]
    pub remote_only: bool,
    pub min_experience: Option<u32>,
    pub max_experience: Option<u32>,
    /// Must-have words in the job description.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Reject jobs whose description contains any of these.
    #[serde(default)]
    pub blacklist_keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub resume: Resume,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}
