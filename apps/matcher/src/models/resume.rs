use serde::{Deserialize, Serialize};

/// Contact block at the top of a resume. Carried for completeness; it never
/// feeds the matcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Header {
    pub full_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub portfolio: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub id: String,
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub gpa: String,
    #[serde(default)]
    pub coursework: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub id: String,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Ordered; the projection keeps this order.
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub technologies: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description_bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub programming_languages: Vec<String>,
    #[serde(default)]
    pub frameworks_tools: Vec<String>,
    #[serde(default)]
    pub other: Vec<String>,
}

impl Skills {
    /// Languages, then frameworks/tools, then other, in declaration order.
    pub fn flattened(&self) -> impl Iterator<Item = &str> {
        self.programming_languages
            .iter()
            .chain(&self.frameworks_tools)
            .chain(&self.other)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificationEntry {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub date: String,
}

/// Structured resume as stored on a user profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub header: Option<Header>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
}
