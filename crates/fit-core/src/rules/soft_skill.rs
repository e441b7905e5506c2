use std::collections::HashSet;

use crate::skill_normalizer::normalize_skill;

use super::{Rule, RuleContext, RuleError, RuleOutcome};

const SOFT_SKILL_KEYWORDS: &[&str] = &[
    "communication",
    "leadership",
    "teamwork",
    "problem solving",
    "critical thinking",
    "time management",
    "project management",
    "analytical thinking",
    "creativity",
    "adaptability",
    "collaboration",
    "presentation",
    "negotiation",
    "customer service",
];

/// Moderate weight for interpersonal abilities.
pub struct SoftSkillRule {
    weight: f64,
    keywords: Vec<&'static str>,
}

impl SoftSkillRule {
    pub fn new() -> Self {
        Self::with_keywords(SOFT_SKILL_KEYWORDS)
    }

    pub fn with_keywords(keywords: &[&'static str]) -> Self {
        Self {
            weight: 1.5,
            keywords: keywords.to_vec(),
        }
    }

    fn is_soft_skill(&self, skill: &str) -> bool {
        let normalized = normalize_skill(skill);
        self.keywords.iter().any(|kw| normalized.contains(kw))
    }

    fn soft_set(&self, skills: &[String]) -> HashSet<String> {
        skills
            .iter()
            .filter(|s| self.is_soft_skill(s))
            .map(|s| normalize_skill(s))
            .collect()
    }
}

impl Default for SoftSkillRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for SoftSkillRule {
    fn name(&self) -> &'static str {
        "Soft Skills"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn description(&self) -> &'static str {
        "Moderate weight for soft skills and interpersonal abilities"
    }

    fn evaluate(
        &self,
        user_skills: &[String],
        job_skills: &[String],
        _context: &RuleContext,
    ) -> Result<RuleOutcome, RuleError> {
        let user_soft = self.soft_set(user_skills);
        let job_soft = self.soft_set(job_skills);

        let mut matches: Vec<String> = user_soft.intersection(&job_soft).cloned().collect();
        matches.sort();

        Ok(RuleOutcome {
            score: matches.len() as f64 * self.weight,
            explanation: format!(
                "Found {} soft skill matches (weighted {}x)",
                matches.len(),
                self.weight
            ),
            matches,
        })
    }
}
