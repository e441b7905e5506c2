use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::rules::{default_rules, Rule, RuleContext};
use crate::skill_normalizer::{normalize_skill, normalize_skill_set};

const NO_DATA_RECOMMENDATION: &str = "No skills data available for comparison";

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Aggregation tuning. The defaults reproduce the historical scoring
/// behavior; treat them as parameters, not sacred constants.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on the percentage bonus earned from rule scores.
    pub rule_bonus_cap: f64,
    /// Percentage points granted per accumulated rule-score point.
    pub rule_bonus_per_point: f64,
    pub missing_skills_limit: usize,
    pub matched_skills_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rule_bonus_cap: 30.0,
            rule_bonus_per_point: 2.0,
            missing_skills_limit: 10,
            matched_skills_limit: 15,
        }
    }
}

impl EngineConfig {
    /// Environment overrides, `FIT_*` keys. Unset or unparsable values
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rule_bonus_cap: env_f64("FIT_RULE_BONUS_CAP", defaults.rule_bonus_cap),
            rule_bonus_per_point: env_f64(
                "FIT_RULE_BONUS_PER_POINT",
                defaults.rule_bonus_per_point,
            ),
            missing_skills_limit: env_usize("FIT_MISSING_LIMIT", defaults.missing_skills_limit),
            matched_skills_limit: env_usize("FIT_MATCHED_LIMIT", defaults.matched_skills_limit),
        }
    }
}

/// One rule's contribution to a match evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule_name: String,
    pub score: f64,
    pub weight: f64,
    pub matches: Vec<String>,
    pub explanation: String,
}

/// Full structured result of running all rules against one
/// candidate/job pair. Immutable once returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub total_score: f64,
    /// Always within [0, 100] even though `total_score` is unbounded.
    pub percentage: u8,
    pub rule_results: Vec<RuleResult>,
    pub recommendations: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_skills: Vec<String>,
}

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
    config: EngineConfig,
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine {
    pub fn new() -> Self {
        Self::with_rules(default_rules(), EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_rules(default_rules(), config)
    }

    /// Custom roster, mainly for tests (smaller vocabularies, induced
    /// failures).
    pub fn with_rules(rules: Vec<Box<dyn Rule>>, config: EngineConfig) -> Self {
        Self { rules, config }
    }

    /// Run every rule against the two skill lists and aggregate into a
    /// report. Never fails: degenerate input short-circuits to a zeroed
    /// report, and a rule error is absorbed into that rule's result.
    pub fn evaluate_match(
        &self,
        user_skills: &[String],
        job_skills: &[String],
        job_description: &str,
        user_context: Option<&RuleContext>,
    ) -> MatchReport {
        if user_skills.is_empty() || job_skills.is_empty() {
            return MatchReport {
                total_score: 0.0,
                percentage: 0,
                rule_results: vec![],
                recommendations: vec![NO_DATA_RECOMMENDATION.to_string()],
                missing_skills: job_skills.to_vec(),
                matched_skills: vec![],
            };
        }

        let mut context = user_context.cloned().unwrap_or_default();
        context.insert("job_description".to_string(), job_description.to_string());

        let mut rule_results = Vec::with_capacity(self.rules.len());
        let mut total_score = 0.0;
        let mut all_matches: Vec<String> = Vec::new();

        for rule in &self.rules {
            match rule.evaluate(user_skills, job_skills, &context) {
                Ok(outcome) => {
                    total_score += outcome.score;
                    all_matches.extend(outcome.matches.iter().cloned());
                    rule_results.push(RuleResult {
                        rule_name: rule.name().to_string(),
                        score: outcome.score,
                        weight: rule.weight(),
                        matches: outcome.matches,
                        explanation: outcome.explanation,
                    });
                }
                Err(err) => {
                    warn!(rule = rule.name(), error = %err, "rule evaluation failed, scoring as zero");
                    rule_results.push(RuleResult {
                        rule_name: rule.name().to_string(),
                        score: 0.0,
                        weight: rule.weight(),
                        matches: vec![],
                        explanation: format!("Error: {err}"),
                    });
                }
            }
        }

        // Percentage floor is exact-match coverage of the job
        // requirements; rule scores add a capped bonus on top.
        let job_set = normalize_skill_set(job_skills);
        let user_set = normalize_skill_set(user_skills);
        let exact_matches = job_set.intersection(&user_set).count();
        let base_percentage = exact_matches as f64 / job_set.len().max(1) as f64 * 100.0;
        let rule_bonus =
            (total_score * self.config.rule_bonus_per_point).min(self.config.rule_bonus_cap);
        let percentage = (base_percentage + rule_bonus).floor().min(100.0) as u8;

        // Original order and casing
        let mut missing_skills: Vec<String> = job_skills
            .iter()
            .filter(|skill| !user_set.contains(&normalize_skill(skill)))
            .cloned()
            .collect();

        let mut seen = HashSet::new();
        let mut matched_skills: Vec<String> = all_matches
            .into_iter()
            .filter(|m| seen.insert(m.clone()))
            .collect();
        matched_skills.truncate(self.config.matched_skills_limit);

        // Advisories see the full gap list; the report is truncated after
        let recommendations =
            self.generate_recommendations(&rule_results, &missing_skills, percentage);
        missing_skills.truncate(self.config.missing_skills_limit);

        MatchReport {
            total_score: (total_score * 100.0).round() / 100.0,
            percentage,
            rule_results,
            recommendations,
            missing_skills,
            matched_skills,
        }
    }

    fn generate_recommendations(
        &self,
        rule_results: &[RuleResult],
        missing_skills: &[String],
        percentage: u8,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        recommendations.push(
            match percentage {
                80..=100 => "🎯 Excellent match! You have most required skills.",
                60..=79 => "👍 Good match! Focus on closing key skill gaps.",
                40..=59 => "⚡ Moderate match. Significant skill development needed.",
                _ => "📚 Low match. Consider building foundational skills first.",
            }
            .to_string(),
        );

        for result in rule_results {
            if result.rule_name == "Technical Skills" && result.score < 3.0 {
                recommendations.push(
                    "💻 Focus on building technical skills for better job match.".to_string(),
                );
            } else if result.rule_name == "Experience Level" && result.score < 2.0 {
                recommendations
                    .push("⭐ Consider roles matching your experience level.".to_string());
            }
        }

        if !missing_skills.is_empty() {
            let top_missing: Vec<&str> =
                missing_skills.iter().take(3).map(String::as_str).collect();
            recommendations.push(format!(
                "📖 Priority skills to learn: {}",
                top_missing.join(", ")
            ));
        }

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleError, RuleOutcome};

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    struct FailingRule;

    impl Rule for FailingRule {
        fn name(&self) -> &'static str {
            "Failing Rule"
        }

        fn weight(&self) -> f64 {
            1.0
        }

        fn description(&self) -> &'static str {
            "Always fails"
        }

        fn evaluate(
            &self,
            _user_skills: &[String],
            _job_skills: &[String],
            _context: &RuleContext,
        ) -> Result<RuleOutcome, RuleError> {
            Err(RuleError::Evaluation("keyword table unavailable".into()))
        }
    }

    #[test]
    fn empty_user_skills_short_circuit() {
        let engine = RulesEngine::new();
        let report = engine.evaluate_match(&[], &skills(&["sql"]), "", None);

        assert_eq!(report.percentage, 0);
        assert_eq!(report.total_score, 0.0);
        assert!(report.rule_results.is_empty());
        assert_eq!(report.missing_skills, vec!["sql"]);
        assert!(report.matched_skills.is_empty());
        assert_eq!(
            report.recommendations,
            vec!["No skills data available for comparison"]
        );
    }

    #[test]
    fn empty_job_skills_short_circuit() {
        let engine = RulesEngine::new();
        let report = engine.evaluate_match(&skills(&["sql"]), &[], "", None);

        assert_eq!(report.percentage, 0);
        assert!(report.missing_skills.is_empty());
    }

    #[test]
    fn one_result_per_configured_rule() {
        let engine = RulesEngine::new();
        let report = engine.evaluate_match(
            &skills(&["python"]),
            &skills(&["python", "sql"]),
            "backend role",
            None,
        );

        assert_eq!(report.rule_results.len(), 5);
        let names: Vec<_> = report
            .rule_results
            .iter()
            .map(|r| r.rule_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Exact Match",
                "Technical Skills",
                "Soft Skills",
                "Similar Skills",
                "Experience Level",
            ]
        );
    }

    #[test]
    fn failing_rule_is_isolated() {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(crate::rules::ExactMatchRule::new()),
            Box::new(FailingRule),
        ];
        let engine = RulesEngine::with_rules(rules, EngineConfig::default());
        let report =
            engine.evaluate_match(&skills(&["python"]), &skills(&["python"]), "", None);

        assert_eq!(report.rule_results.len(), 2);
        let failed = &report.rule_results[1];
        assert_eq!(failed.score, 0.0);
        assert!(failed.explanation.starts_with("Error:"));
        assert!(failed.explanation.contains("keyword table unavailable"));
        // exact match still contributed
        assert!(report.total_score >= 3.0);
        assert_eq!(report.percentage, 100);
    }

    #[test]
    fn percentage_is_bounded_at_100() {
        let engine = RulesEngine::new();
        let many: Vec<String> = skills(&["python", "sql", "java", "react", "docker", "aws"]);
        let report = engine.evaluate_match(&many, &many.clone(), "", None);

        assert!(report.percentage <= 100);
        assert_eq!(report.percentage, 100);
        assert!(report.total_score > 0.0);
    }

    #[test]
    fn rule_bonus_is_capped() {
        let config = EngineConfig {
            rule_bonus_cap: 0.0,
            ..EngineConfig::default()
        };
        let engine = RulesEngine::with_config(config);
        // one of two job skills covered, zero bonus allowed
        let report = engine.evaluate_match(
            &skills(&["python"]),
            &skills(&["python", "cobol"]),
            "",
            None,
        );

        assert_eq!(report.percentage, 50);
    }

    #[test]
    fn missing_skills_keep_order_and_truncate_to_ten() {
        let engine = RulesEngine::new();
        let job: Vec<String> = (0..12).map(|i| format!("skill-{i}")).collect();
        let report = engine.evaluate_match(&skills(&["unrelated"]), &job, "", None);

        assert_eq!(report.missing_skills.len(), 10);
        assert_eq!(report.missing_skills[0], "skill-0");
        assert_eq!(report.missing_skills[9], "skill-9");
    }

    #[test]
    fn blank_job_skill_counts_against_coverage() {
        let engine = RulesEngine::new();
        let report =
            engine.evaluate_match(&skills(&["python"]), &skills(&["python", " "]), "", None);

        // the blank entry normalizes to "" and stays in the job-side
        // denominator, so coverage is 1/2; it also shows up as missing.
        // The two views agree instead of reporting a perfect score next
        // to a non-empty gap list.
        assert_eq!(report.missing_skills, vec![" "]);
        assert!(report.percentage < 100);
        assert_eq!(report.percentage, 64);
    }

    #[test]
    fn priority_advisory_sees_the_full_gap_list_under_tight_limits() {
        let config = EngineConfig {
            missing_skills_limit: 1,
            ..EngineConfig::default()
        };
        let engine = RulesEngine::with_config(config);
        let report = engine.evaluate_match(
            &skills(&["knitting"]),
            &skills(&["pottery", "weaving", "carving"]),
            "",
            None,
        );

        // report list is truncated, but the advisory still names the
        // top three gaps
        assert_eq!(report.missing_skills, vec!["pottery"]);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("Priority skills to learn: pottery, weaving, carving")));
    }

    #[test]
    fn matched_skills_are_deduplicated_and_truncated() {
        let engine = RulesEngine::new();
        // python appears in exact, technical and similarity matches; the
        // aggregated list must not repeat identical entries
        let report = engine.evaluate_match(
            &skills(&["python", "sql"]),
            &skills(&["python", "sql"]),
            "",
            None,
        );

        let unique: HashSet<_> = report.matched_skills.iter().collect();
        assert_eq!(unique.len(), report.matched_skills.len());
        assert!(report.matched_skills.len() <= 15);
        assert!(report
            .matched_skills
            .iter()
            .any(|m| m == "python"));
    }

    #[test]
    fn low_match_recommendations_include_advisories() {
        let engine = RulesEngine::new();
        let report = engine.evaluate_match(
            &skills(&["knitting"]),
            &skills(&["python", "sql", "leadership"]),
            "",
            None,
        );

        assert!(report.recommendations[0].contains("Low match"));
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("technical skills")));
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("experience level")));
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("Priority skills to learn: python, sql, leadership")));
    }

    #[test]
    fn excellent_match_tier_message() {
        let engine = RulesEngine::new();
        let both = skills(&["python", "sql", "react"]);
        let report = engine.evaluate_match(&both, &both.clone(), "", None);

        assert!(report.percentage >= 80);
        assert!(report.recommendations[0].contains("Excellent match"));
        // nothing missing, no priority line
        assert!(!report
            .recommendations
            .iter()
            .any(|r| r.contains("Priority skills")));
    }

    #[test]
    fn context_receives_job_description() {
        struct ContextProbe;

        impl Rule for ContextProbe {
            fn name(&self) -> &'static str {
                "Context Probe"
            }
            fn weight(&self) -> f64 {
                1.0
            }
            fn description(&self) -> &'static str {
                "Asserts context contents"
            }
            fn evaluate(
                &self,
                _user: &[String],
                _job: &[String],
                context: &RuleContext,
            ) -> Result<RuleOutcome, RuleError> {
                let jd = context
                    .get("job_description")
                    .ok_or_else(|| RuleError::MissingContext("job_description".into()))?;
                Ok(RuleOutcome {
                    score: 0.0,
                    matches: vec![],
                    explanation: jd.clone(),
                })
            }
        }

        let engine =
            RulesEngine::with_rules(vec![Box::new(ContextProbe)], EngineConfig::default());
        let report = engine.evaluate_match(
            &skills(&["a"]),
            &skills(&["b"]),
            "senior backend role",
            None,
        );

        assert_eq!(report.rule_results[0].explanation, "senior backend role");
    }

    #[test]
    fn total_score_is_rounded_to_two_decimals() {
        let engine = RulesEngine::new();
        let report = engine.evaluate_match(
            &skills(&["js"]),
            &skills(&["javascript"]),
            "",
            None,
        );

        // similarity contributes 1.8; stored value must stay exact
        assert_eq!(report.total_score, 1.8);
    }
}
