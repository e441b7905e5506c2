use crate::skill_normalizer::normalize_skill;

use super::{Rule, RuleContext, RuleError, RuleOutcome};

/// Base skill → related keywords, checked symmetrically: the pair is
/// similar when one side contains the base and the other contains any
/// related keyword.
const SIMILARITY_MAP: &[(&str, &[&str])] = &[
    ("python", &["scripting", "automation", "data analysis"]),
    (
        "javascript",
        &["web development", "frontend", "react", "angular"],
    ),
    ("sql", &["database", "data querying", "mysql", "postgresql"]),
    (
        "project management",
        &["coordination", "planning", "scrum", "agile"],
    ),
    (
        "data analysis",
        &["analytics", "statistics", "reporting", "excel"],
    ),
    (
        "machine learning",
        &["ai", "artificial intelligence", "deep learning", "ml"],
    ),
    (
        "communication",
        &["presentation", "writing", "verbal communication"],
    ),
    ("leadership", &["management", "team lead", "supervision"]),
];

/// Abbreviation / full-form pairs, also checked in both directions.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("py", "python"),
    ("sql", "database"),
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("pm", "project management"),
    ("dev", "development"),
    ("admin", "administration"),
    ("mgmt", "management"),
];

/// Matches for similar or related skills. Each (user, job) pair is
/// counted at most once even when several checks agree.
pub struct SimilarityRule {
    weight: f64,
    similarity_map: Vec<(&'static str, &'static [&'static str])>,
    abbreviations: Vec<(&'static str, &'static str)>,
}

impl SimilarityRule {
    pub fn new() -> Self {
        Self::with_tables(SIMILARITY_MAP, ABBREVIATIONS)
    }

    pub fn with_tables(
        similarity_map: &[(&'static str, &'static [&'static str])],
        abbreviations: &[(&'static str, &'static str)],
    ) -> Self {
        Self {
            weight: 1.8,
            similarity_map: similarity_map.to_vec(),
            abbreviations: abbreviations.to_vec(),
        }
    }

    fn are_similar(&self, skill1: &str, skill2: &str) -> bool {
        for (base, related) in &self.similarity_map {
            if skill1.contains(base) && related.iter().any(|r| skill2.contains(r)) {
                return true;
            }
            if skill2.contains(base) && related.iter().any(|r| skill1.contains(r)) {
                return true;
            }
        }

        if shares_four_char_prefix(skill1, skill2) {
            return true;
        }

        self.abbreviations.iter().any(|(short, full)| {
            (skill1.contains(short) && skill2.contains(full))
                || (skill2.contains(short) && skill1.contains(full))
        })
    }
}

fn shares_four_char_prefix(skill1: &str, skill2: &str) -> bool {
    let p1: Vec<char> = skill1.chars().take(4).collect();
    let p2: Vec<char> = skill2.chars().take(4).collect();
    p1.len() == 4 && p2.len() == 4 && p1 == p2
}

impl Default for SimilarityRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for SimilarityRule {
    fn name(&self) -> &'static str {
        "Similar Skills"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn description(&self) -> &'static str {
        "Matches for similar or related skills"
    }

    fn evaluate(
        &self,
        user_skills: &[String],
        job_skills: &[String],
        _context: &RuleContext,
    ) -> Result<RuleOutcome, RuleError> {
        let mut matches = Vec::new();
        let mut score = 0.0;

        for user_skill in user_skills {
            let user_norm = normalize_skill(user_skill);
            for job_skill in job_skills {
                let job_norm = normalize_skill(job_skill);
                if self.are_similar(&user_norm, &job_norm) {
                    // Original casing kept for display
                    matches.push(format!("{user_skill} ≈ {job_skill}"));
                    score += self.weight;
                }
            }
        }

        Ok(RuleOutcome {
            score,
            explanation: format!("Found {} similar skill matches", matches.len()),
            matches,
        })
    }
}
