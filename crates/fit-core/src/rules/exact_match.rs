use crate::skill_normalizer::normalize_skill_set;

use super::{Rule, RuleContext, RuleError, RuleOutcome};

/// Direct matches between candidate and job skills after normalization.
pub struct ExactMatchRule {
    weight: f64,
}

impl ExactMatchRule {
    pub fn new() -> Self {
        Self { weight: 3.0 }
    }
}

impl Default for ExactMatchRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ExactMatchRule {
    fn name(&self) -> &'static str {
        "Exact Match"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn description(&self) -> &'static str {
        "Direct matches between user and job skills"
    }

    fn evaluate(
        &self,
        user_skills: &[String],
        job_skills: &[String],
        _context: &RuleContext,
    ) -> Result<RuleOutcome, RuleError> {
        let user_set = normalize_skill_set(user_skills);
        let job_set = normalize_skill_set(job_skills);

        let mut matches: Vec<String> = user_set.intersection(&job_set).cloned().collect();
        matches.sort();

        Ok(RuleOutcome {
            score: matches.len() as f64 * self.weight,
            explanation: format!("Found {} exact skill matches", matches.len()),
            matches,
        })
    }
}
