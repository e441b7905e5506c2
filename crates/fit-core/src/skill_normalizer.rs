use std::collections::HashSet;

/// Canonical skill form used by every rule and by the engine's
/// percentage/missing computation: lower-cased, surrounding whitespace
/// stripped. Original casing is kept by callers for display.
pub fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Normalize a skill slice into a set. Blank entries normalize to the
/// empty string and stay in the set, so they count toward the job-side
/// denominator exactly like any other unmatched skill; callers that
/// want blanks removed filter before normalizing.
pub fn normalize_skill_set(skills: &[String]) -> HashSet<String> {
    skills.iter().map(|s| normalize_skill(s)).collect()
}

/// Normalize into a sorted, de-duplicated Vec (stable output for reports).
pub fn normalize_skills_vec(skills: &[String]) -> Vec<String> {
    let mut result: Vec<String> = skills
        .iter()
        .map(|s| normalize_skill(s))
        .filter(|s| !s.is_empty())
        .collect();
    result.sort();
    result.dedup();
    result
}
