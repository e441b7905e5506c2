use std::collections::HashSet;

use crate::skill_normalizer::normalize_skill;

use super::{Rule, RuleContext, RuleError, RuleOutcome};

/// Technology vocabulary: languages, frameworks, platforms, data tools.
/// A skill counts as technical when its normalized form contains any of
/// these as a substring.
const TECHNICAL_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "c++",
    "sql",
    "html",
    "css",
    "react",
    "angular",
    "node.js",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "git",
    "linux",
    "mongodb",
    "postgresql",
    "mysql",
    "tensorflow",
    "pytorch",
    "pandas",
    "numpy",
    "django",
    "flask",
    "spring",
    "restapi",
    "graphql",
    "machine learning",
    "data analysis",
    "tableau",
    "power bi",
    "excel",
    "r programming",
    "scala",
    "golang",
    "rust",
];

/// Higher weight for programming languages and technical tooling.
pub struct TechnicalSkillRule {
    weight: f64,
    keywords: Vec<&'static str>,
}

impl TechnicalSkillRule {
    pub fn new() -> Self {
        Self::with_keywords(TECHNICAL_KEYWORDS)
    }

    /// Injectable vocabulary for tests and tuned deployments.
    pub fn with_keywords(keywords: &[&'static str]) -> Self {
        Self {
            weight: 2.5,
            keywords: keywords.to_vec(),
        }
    }

    fn is_technical(&self, skill: &str) -> bool {
        let normalized = normalize_skill(skill);
        self.keywords.iter().any(|kw| normalized.contains(kw))
    }

    fn technical_set(&self, skills: &[String]) -> HashSet<String> {
        skills
            .iter()
            .filter(|s| self.is_technical(s))
            .map(|s| normalize_skill(s))
            .collect()
    }
}

impl Default for TechnicalSkillRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for TechnicalSkillRule {
    fn name(&self) -> &'static str {
        "Technical Skills"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn description(&self) -> &'static str {
        "Higher weight for programming languages and technical tools"
    }

    fn evaluate(
        &self,
        user_skills: &[String],
        job_skills: &[String],
        _context: &RuleContext,
    ) -> Result<RuleOutcome, RuleError> {
        let user_tech = self.technical_set(user_skills);
        let job_tech = self.technical_set(job_skills);

        let mut matches: Vec<String> = user_tech.intersection(&job_tech).cloned().collect();
        matches.sort();

        Ok(RuleOutcome {
            score: matches.len() as f64 * self.weight,
            explanation: format!(
                "Found {} technical skill matches (weighted {}x)",
                matches.len(),
                self.weight
            ),
            matches,
        })
    }
}
