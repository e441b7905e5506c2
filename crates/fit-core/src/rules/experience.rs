use std::fmt;

use super::{Rule, RuleContext, RuleError, RuleOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seniority {
    Senior,
    Mid,
    Junior,
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seniority::Senior => write!(f, "senior"),
            Seniority::Mid => write!(f, "mid"),
            Seniority::Junior => write!(f, "junior"),
        }
    }
}

/// Scan order matters: a list mentioning both "senior" and "junior"
/// resolves to senior because that bucket is checked first.
const LEVEL_KEYWORDS: &[(Seniority, &[&str])] = &[
    (Seniority::Senior, &["senior", "lead", "principal", "architect"]),
    (Seniority::Mid, &["mid-level", "intermediate", "experienced"]),
    (
        Seniority::Junior,
        &["junior", "entry-level", "associate", "trainee"],
    ),
];

/// Compares seniority indicators found in the two skill lists.
pub struct ExperienceLevelRule {
    weight: f64,
    levels: Vec<(Seniority, &'static [&'static str])>,
}

impl ExperienceLevelRule {
    pub fn new() -> Self {
        Self::with_levels(LEVEL_KEYWORDS)
    }

    pub fn with_levels(levels: &[(Seniority, &'static [&'static str])]) -> Self {
        Self {
            weight: 2.0,
            levels: levels.to_vec(),
        }
    }

    fn extract_level(&self, skills: &[String]) -> Option<Seniority> {
        let text = skills.join(" ").to_lowercase();
        for (level, keywords) in &self.levels {
            if keywords.iter().any(|kw| text.contains(kw)) {
                return Some(*level);
            }
        }
        None
    }
}

impl Default for ExperienceLevelRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ExperienceLevelRule {
    fn name(&self) -> &'static str {
        "Experience Level"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn description(&self) -> &'static str {
        "Matches experience levels and seniority"
    }

    fn evaluate(
        &self,
        user_skills: &[String],
        job_skills: &[String],
        _context: &RuleContext,
    ) -> Result<RuleOutcome, RuleError> {
        let user_level = self.extract_level(user_skills);
        let job_level = self.extract_level(job_skills);

        let (score, explanation) = match (user_level, job_level) {
            (Some(user), Some(job)) if user == job => (
                self.weight * 3.0,
                format!("Experience level match: {user}"),
            ),
            // Overqualified by one step is still compatible
            (Some(user @ Seniority::Senior), Some(job @ Seniority::Mid))
            | (Some(user @ Seniority::Mid), Some(job @ Seniority::Junior)) => (
                self.weight * 2.0,
                format!("Experience level compatible: {user} > {job}"),
            ),
            (Some(user), Some(job)) => (
                self.weight * 0.5,
                format!("Experience level mismatch: {user} vs {job}"),
            ),
            _ => (0.0, String::new()),
        };

        if explanation.is_empty() {
            return Ok(RuleOutcome {
                score: 0.0,
                matches: vec![],
                explanation: "No clear experience level indicators found".to_string(),
            });
        }

        Ok(RuleOutcome {
            score,
            matches: vec![explanation.clone()],
            explanation,
        })
    }
}
