//! Experience extraction: estimates the minimum years of experience a job
//! description asks for.

pub mod extractor;

use serde::{Deserialize, Serialize};

pub use extractor::ExperienceExtractor;

/// Minimum required years, or `Unknown` when the input could not be read
/// as text at all. Serialized as an integer, with `Unknown` as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum ExperienceEstimate {
    Known(u32),
    Unknown,
}

impl ExperienceEstimate {
    pub fn years(self) -> Option<u32> {
        match self {
            ExperienceEstimate::Known(years) => Some(years),
            ExperienceEstimate::Unknown => None,
        }
    }
}

impl From<Option<u32>> for ExperienceEstimate {
    fn from(value: Option<u32>) -> Self {
        value.map_or(ExperienceEstimate::Unknown, ExperienceEstimate::Known)
    }
}

impl From<ExperienceEstimate> for Option<u32> {
    fn from(value: ExperienceEstimate) -> Self {
        value.years()
    }
}

/// Phrase lists driving the extractor. All matching is case-insensitive
/// substring matching against the lower-cased description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceConfig {
    /// Any of these anywhere in the text forces the estimate to 0.
    pub fresher_terms: Vec<String>,
    /// Lines containing these state optional experience and are skipped.
    pub optional_qualifiers: Vec<String>,
    /// Lines containing these usually talk about the company's own history.
    pub blacklist_phrases: Vec<String>,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            fresher_terms: to_strings(&[
                "fresher",
                "entry level",
                "entry-level",
                "graduate trainee",
                "campus hire",
                "fresh graduate",
                "recent graduate",
                "walk in",
                "walk-in",
                "intern to full time",
                "trainee program",
            ]),
            optional_qualifiers: to_strings(&[
                "preferred",
                "nice to have",
                "nice-to-have",
                "optional",
                "a plus",
            ]),
            blacklist_phrases: to_strings(&[
                "company",
                "organization",
                "established",
                "founded",
                "in business",
                "track record",
                "industry experience",
            ]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
