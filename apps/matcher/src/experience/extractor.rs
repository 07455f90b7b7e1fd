//! Layered heuristic for the minimum years of experience in a job description.
//!
//! Algorithm:
//! 1. Empty text → 0. Any fresher term anywhere → 0.
//! 2. Per line, skipping optional and company-history lines, collect
//!    candidates from, in order: numeric ranges (low bound), word ranges
//!    (low bound), "N+ years", "five years", "18 months" (÷ 12).
//!    Ranges are consumed once matched so their high bound is never re-read.
//! 3. No candidates, a zero candidate, or an "up to / max N years" cap → 0.
//!    Otherwise the largest candidate, rounded half-up.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::experience::{ExperienceConfig, ExperienceEstimate};

const NUMBER_WORDS: &[(&str, f64)] = &[
    ("a", 1.0),
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
    ("six", 6.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("nine", 9.0),
    ("ten", 10.0),
    ("eleven", 11.0),
    ("twelve", 12.0),
    ("thirteen", 13.0),
    ("fourteen", 14.0),
    ("fifteen", 15.0),
    ("sixteen", 16.0),
    ("seventeen", 17.0),
    ("eighteen", 18.0),
    ("nineteen", 19.0),
    ("twenty", 20.0),
    ("half", 0.5),
    ("quarter", 0.25),
    ("dozen", 12.0),
];

const YEAR_UNIT: &str = r"(?:years?|yrs?|exp(?:erience)?|y)";
const NUMBER: &str = r"(\d+(?:\.\d+)?)";

static NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s.+\-]").expect("valid noise regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// "2-4 years", "2 to 4 yrs", or "between 2 and 4 years". A bare "and" is
/// not a separator: "Python 3 and 6 years" holds two unrelated numbers.
static NUMERIC_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:between\s+{NUMBER}\s+and|{NUMBER}\s*(?:-|to))\s*{NUMBER}\s*{YEAR_UNIT}\b"
    ))
    .expect("valid numeric range regex")
});

static WORD_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let words = number_word_alternation();
    Regex::new(&format!(
        r"\bbetween\s+({words})\s+(?:and|to)\s+({words})\s+years?\b"
    ))
    .expect("valid word range regex")
});

static NUMERIC_YEARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b{NUMBER}\s*\+?\s*{YEAR_UNIT}\b")).expect("valid numeric years regex")
});

static WORD_YEARS: LazyLock<Regex> = LazyLock::new(|| {
    let words = number_word_alternation();
    Regex::new(&format!(r"\b({words})\s+(?:years?|yrs?|exp(?:erience)?)\b"))
        .expect("valid word years regex")
});

static MONTHS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b{NUMBER}\s*\+?\s*months?\b")).expect("valid months regex")
});

/// "up to 2 years" / "max 1 year" describe a ceiling, which reads as an
/// entry-level role.
static CEILING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:up to|max)\s+\d+\s+years?").expect("valid ceiling regex"));

fn number_word_alternation() -> String {
    NUMBER_WORDS
        .iter()
        .map(|(word, _)| *word)
        .collect::<Vec<_>>()
        .join("|")
}

fn number_word_value(word: &str) -> Option<f64> {
    NUMBER_WORDS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, value)| *value)
}

fn round_half_up(value: f64) -> u32 {
    // float → int casts saturate, so absurd inputs land on u32::MAX, not UB
    (value + 0.5).floor().max(0.0) as u32
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Stateless apart from its phrase lists; build once and share.
#[derive(Debug, Clone)]
pub struct ExperienceExtractor {
    fresher_terms: Vec<String>,
    optional_qualifiers: Vec<String>,
    blacklist_phrases: Vec<String>,
}

impl Default for ExperienceExtractor {
    fn default() -> Self {
        Self::new(ExperienceConfig::default())
    }
}

impl ExperienceExtractor {
    pub fn new(config: ExperienceConfig) -> Self {
        let lower = |terms: Vec<String>| -> Vec<String> {
            terms
                .into_iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect()
        };
        Self {
            fresher_terms: lower(config.fresher_terms),
            optional_qualifiers: lower(config.optional_qualifiers),
            blacklist_phrases: lower(config.blacklist_phrases),
        }
    }

    /// Estimates the minimum required years. Never fails: empty text means
    /// no requirement was stated.
    pub fn extract(&self, description: &str) -> ExperienceEstimate {
        if description.trim().is_empty() {
            return ExperienceEstimate::Known(0);
        }

        let lowered = description.to_lowercase();

        if self.fresher_terms.iter().any(|t| lowered.contains(t.as_str())) {
            debug!("Fresher language found; experience estimate is 0");
            return ExperienceEstimate::Known(0);
        }

        let candidates: Vec<f64> = lowered
            .lines()
            .filter(|line| !self.is_skipped_line(line))
            .flat_map(|line| candidates_in_line(&clean_line(line)))
            .collect();

        debug!("Experience candidates: {candidates:?}");

        if candidates.is_empty() || candidates.iter().any(|c| *c == 0.0) {
            return ExperienceEstimate::Known(0);
        }

        if CEILING.is_match(&lowered) {
            return ExperienceEstimate::Known(0);
        }

        let highest = candidates.iter().copied().fold(f64::MIN, f64::max);
        ExperienceEstimate::Known(round_half_up(highest))
    }

    /// Extracts from a loosely-typed scraped field. Strings are extracted,
    /// `null` counts as empty, anything else is `Unknown`.
    pub fn extract_from_value(&self, value: &Value) -> ExperienceEstimate {
        match value {
            Value::String(text) => self.extract(text),
            Value::Null => ExperienceEstimate::Known(0),
            _ => ExperienceEstimate::Unknown,
        }
    }

    fn is_skipped_line(&self, line: &str) -> bool {
        self.optional_qualifiers
            .iter()
            .chain(&self.blacklist_phrases)
            .any(|k| line.contains(k.as_str()))
    }
}

fn clean_line(line: &str) -> String {
    // en dash, em dash and minus sign all read as a range hyphen
    let hyphenated = line.replace(['\u{2013}', '\u{2014}', '\u{2212}'], "-");
    let stripped = NOISE.replace_all(&hyphenated, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

fn candidates_in_line(line: &str) -> Vec<f64> {
    let mut candidates = Vec::new();

    for caps in NUMERIC_RANGE.captures_iter(line) {
        let low = caps.get(1).or_else(|| caps.get(2));
        if let Some(Ok(low)) = low.map(|m| m.as_str().parse::<f64>()) {
            candidates.push(low);
        }
    }
    let without_ranges = NUMERIC_RANGE.replace_all(line, " ");

    for caps in WORD_RANGE.captures_iter(&without_ranges) {
        candidates.extend(number_word_value(&caps[1]));
    }
    let without_word_ranges = WORD_RANGE.replace_all(&without_ranges, " ");

    for caps in NUMERIC_YEARS.captures_iter(&without_word_ranges) {
        if let Ok(years) = caps[1].parse::<f64>() {
            candidates.push(years);
        }
    }

    for caps in WORD_YEARS.captures_iter(&without_word_ranges) {
        candidates.extend(number_word_value(&caps[1]));
    }

    for caps in MONTHS.captures_iter(&without_word_ranges) {
        if let Ok(months) = caps[1].parse::<f64>() {
            candidates.push(round_to_tenth(months / 12.0));
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(text: &str) -> ExperienceEstimate {
        ExperienceExtractor::default().extract(text)
    }

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(extract(""), ExperienceEstimate::Known(0));
        assert_eq!(extract("   \n\t "), ExperienceEstimate::Known(0));
    }

    #[test]
    fn test_numeric_range_takes_low_bound() {
        let jd = "Looking for a Data Analyst, 2-4 years experience required.";
        assert_eq!(extract(jd), ExperienceEstimate::Known(2));
    }

    #[test]
    fn test_unicode_dash_range_takes_low_bound() {
        let jd = "Looking for a Data Analyst, 2\u{2013}4 years experience required.";
        assert_eq!(extract(jd), ExperienceEstimate::Known(2));
        assert_eq!(extract("2 \u{2013} 4 years of SQL"), ExperienceEstimate::Known(2));
        assert_eq!(extract("3\u{2014}5 yrs in support"), ExperienceEstimate::Known(3));
    }

    #[test]
    fn test_between_numeric_range_takes_low_bound() {
        assert_eq!(extract("between 2 and 4 years of Go"), ExperienceEstimate::Known(2));
    }

    #[test]
    fn test_bare_and_does_not_form_a_range() {
        let jd = "Worked with Python 3 and 6 years of backend development";
        assert_eq!(extract(jd), ExperienceEstimate::Known(6));
    }

    #[test]
    fn test_numeric_range_with_to() {
        assert_eq!(extract("3 to 6 yrs of backend work"), ExperienceEstimate::Known(3));
    }

    #[test]
    fn test_word_range_takes_low_bound() {
        let jd = "We need between three and five years of hands-on SQL.";
        assert_eq!(extract(jd), ExperienceEstimate::Known(3));
    }

    #[test]
    fn test_numeric_plus_years() {
        assert_eq!(extract("5+ years of Rust in production"), ExperienceEstimate::Known(5));
    }

    #[test]
    fn test_escaped_plus_from_markdown() {
        assert_eq!(extract("* 5\\+ years in cloud architecture"), ExperienceEstimate::Known(5));
    }

    #[test]
    fn test_word_years() {
        assert_eq!(extract("Minimum of seven years managing teams"), ExperienceEstimate::Known(7));
        assert_eq!(extract("At least a year in retail"), ExperienceEstimate::Known(1));
    }

    #[test]
    fn test_months_convert_to_years() {
        // 18 / 12 = 1.5 → rounds half-up to 2
        assert_eq!(extract("18 months of support experience"), ExperienceEstimate::Known(2));
        // 6 / 12 = 0.5 → 1
        assert_eq!(extract("6+ months internship"), ExperienceEstimate::Known(1));
    }

    #[test]
    fn test_highest_minimum_wins_across_lines() {
        let jd = "Senior Data Engineer\n\
                  - 2+ years with Airflow\n\
                  - 6 years of Python\n\
                  - 3 years of cloud";
        assert_eq!(extract(jd), ExperienceEstimate::Known(6));
    }

    #[test]
    fn test_entry_level_is_zero() {
        let jd = "Entry level role, no experience necessary";
        assert_eq!(extract(jd), ExperienceEstimate::Known(0));
    }

    #[test]
    fn test_fresher_overrides_higher_numbers() {
        let jd = "5 years preferred\nFresher welcome to apply\nMust have 4 years of Java";
        assert_eq!(extract(jd), ExperienceEstimate::Known(0));
    }

    #[test]
    fn test_preferred_lines_are_skipped() {
        let jd = "3 years of SQL required\n\
                  8 years of Tableau preferred\n\
                  Nice to have: 10 years finance";
        assert_eq!(extract(jd), ExperienceEstimate::Known(3));
    }

    #[test]
    fn test_company_history_lines_are_skipped() {
        let jd = "Our company was founded 40 years ago.\n2 years of sales experience";
        assert_eq!(extract(jd), ExperienceEstimate::Known(2));
    }

    #[test]
    fn test_zero_candidate_forces_zero() {
        assert_eq!(extract("0-2 years of experience"), ExperienceEstimate::Known(0));
    }

    #[test]
    fn test_up_to_ceiling_is_zero() {
        let jd = "Experience: up to 2 years\nSupport engineer, 3 years with Linux";
        assert_eq!(extract(jd), ExperienceEstimate::Known(0));
    }

    #[test]
    fn test_max_ceiling_is_zero() {
        let jd = "Junior support role, max 1 year of experience\n3 years with SQL";
        assert_eq!(extract(jd), ExperienceEstimate::Known(0));
    }

    #[test]
    fn test_no_signal_is_zero() {
        let jd = "Great team, remote friendly, Rust and Go.";
        assert_eq!(extract(jd), ExperienceEstimate::Known(0));
    }

    #[test]
    fn test_multi_section_posting() {
        let jd = r#"
**BASIC QUALIFICATIONS**
* 5\+ years in cloud architecture or solutions engineering, with at least 2 years focused on gaming.
* 2\+ yrs experience designing cloud solutions for real-time applications.
* 3\+ years experience with sales targets

**PREFERRED QUALIFICATIONS**
* AWS experience preferred, 10 years ideally
"#;
        assert_eq!(extract(jd), ExperienceEstimate::Known(5));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = ExperienceExtractor::default();
        let jd = "Between two and four years of Kotlin\n3+ yrs Android";
        let first = extractor.extract(jd);
        let second = extractor.extract(jd);
        assert_eq!(first, second);
        assert_eq!(first, ExperienceEstimate::Known(3));
    }

    #[test]
    fn test_extract_from_value() {
        let extractor = ExperienceExtractor::default();
        assert_eq!(
            extractor.extract_from_value(&json!("4 years of Go")),
            ExperienceEstimate::Known(4)
        );
        assert_eq!(extractor.extract_from_value(&Value::Null), ExperienceEstimate::Known(0));
        assert_eq!(extractor.extract_from_value(&json!(42)), ExperienceEstimate::Unknown);
        assert_eq!(
            extractor.extract_from_value(&json!({"text": "5 years"})),
            ExperienceEstimate::Unknown
        );
    }

    #[test]
    fn test_custom_fresher_terms() {
        let config = ExperienceConfig {
            fresher_terms: vec!["Apprentice".to_string()],
            ..ExperienceConfig::default()
        };
        let extractor = ExperienceExtractor::new(config);
        assert_eq!(
            extractor.extract("Apprentice electrician, 4 years training provided"),
            ExperienceEstimate::Known(0)
        );
        // "entry level" is no longer a fresher term under this config
        assert_eq!(
            extractor.extract("Entry level title but 4 years required"),
            ExperienceEstimate::Known(4)
        );
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(1.5), 2);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(0.25), 0);
    }
}
