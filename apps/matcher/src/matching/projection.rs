use crate::models::resume::Resume;

/// Condenses a resume into the text that gets embedded: summary, each
/// experience (role, company, bullets), each project (title, bullets), then
/// a flattened `Skills:` line. Blank pieces are dropped; pieces are joined
/// by newlines so the order is stable.
pub fn resume_projection(resume: &Resume) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if let Some(summary) = resume.summary.as_deref() {
        parts.push(summary);
    }

    for exp in &resume.experience {
        parts.push(&exp.role);
        parts.push(&exp.company);
        parts.extend(exp.bullets.iter().map(String::as_str));
    }

    for project in &resume.projects {
        parts.push(&project.title);
        parts.extend(project.description_bullets.iter().map(String::as_str));
    }

    let skills: Vec<&str> = resume
        .skills
        .flattened()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let skills_line = (!skills.is_empty()).then(|| format!("Skills: {}", skills.join(", ")));

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .chain(skills_line.as_deref())
        .collect::<Vec<_>>()
        .join("\n")
}
