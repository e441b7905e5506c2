pub mod engine;
pub mod logging;
pub mod rules;
pub mod scoring;
pub mod skill_normalizer;

pub use engine::{EngineConfig, MatchReport, RuleResult, RulesEngine};
pub use rules::{default_rules, Rule, RuleContext, RuleError, RuleOutcome};
pub use scoring::{coverage_score, score_from_skill_lists, CoverageScore, MatchOutcome};
