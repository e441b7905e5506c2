use std::collections::HashMap;

use thiserror::Error;

mod exact_match;
mod experience;
mod similarity;
mod soft_skill;
mod technical;

pub use exact_match::ExactMatchRule;
pub use experience::{ExperienceLevelRule, Seniority};
pub use similarity::SimilarityRule;
pub use soft_skill::SoftSkillRule;
pub use technical::TechnicalSkillRule;

/// Free-form evaluation context handed to every rule. The engine merges
/// the caller's context with a `job_description` entry; current rules
/// only read the skill lists, but the key stays available for rules that
/// want the surrounding text.
pub type RuleContext = HashMap<String, String>;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("missing context key: {0}")]
    MissingContext(String),
    #[error("rule evaluation failed: {0}")]
    Evaluation(String),
}

/// What a single rule produced for one (candidate, job) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub score: f64,
    pub matches: Vec<String>,
    pub explanation: String,
}

/// One scoring heuristic. Implementations hold read-only configuration
/// (name, weight, keyword tables) fixed at construction, so a single
/// instance is safe to share across threads.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    fn weight(&self) -> f64;

    fn description(&self) -> &'static str;

    fn evaluate(
        &self,
        user_skills: &[String],
        job_skills: &[String],
        context: &RuleContext,
    ) -> Result<RuleOutcome, RuleError>;
}

/// The fixed rule roster in evaluation order. Adding or removing a
/// heuristic means changing this list, not the engine.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ExactMatchRule::new()),
        Box::new(TechnicalSkillRule::new()),
        Box::new(SoftSkillRule::new()),
        Box::new(SimilarityRule::new()),
        Box::new(ExperienceLevelRule::new()),
    ]
}
