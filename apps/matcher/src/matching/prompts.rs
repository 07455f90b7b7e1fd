// Prompts for the LLM matcher.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub fn match_system() -> String {
    format!("{JSON_ONLY_SYSTEM} You are a precise job matching assistant.")
}

/// Placeholders: {job_description}, {resume_json}.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Compare the following job description and candidate resume.

Rules:
- Keys: "fit" ("Yes" or "No"), "reasons" (list of short bullets), "score" (0-1 float).
- Place the highest weight on required years of experience and role relevance:
  - If the job explicitly requires experience (e.g. "3+ years in Java") and the
    resume does not meet it, "fit" must be "No" regardless of other matches.
  - Skills and projects are secondary to experience.
- The "score" should reflect this weighting (experience > skills > projects > education).

Job Description:
{job_description}

Candidate Resume (structured JSON):
{resume_json}

Return format (strict JSON):
{"fit": "Yes" or "No", "reasons": ["bullet1", "bullet2", "bullet3"], "score": 0.0 to 1.0}"#;

/// Fills both placeholders in one pass, so placeholder text inside the
/// posting or the resume is left as-is.
pub fn build_match_prompt(job_description: &str, resume_json: &str) -> String {
    let (head, tail) = MATCH_PROMPT_TEMPLATE
        .split_once("{job_description}")
        .unwrap_or((MATCH_PROMPT_TEMPLATE, ""));
    let (middle, end) = tail.split_once("{resume_json}").unwrap_or((tail, ""));
    format!("{head}{job_description}{middle}{resume_json}{end}")
}
