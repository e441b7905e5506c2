use serde::{Deserialize, Serialize};

use std::collections::HashSet;

use crate::engine::{MatchReport, RulesEngine};
use crate::skill_normalizer::normalize_skill;

fn nonblank_skill_set(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| normalize_skill(s))
        .collect()
}

/// Stable external shape consumed by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub score: u8,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// Full rule-by-rule breakdown for detailed rendering.
    pub analysis: MatchReport,
    pub recommendations: Vec<String>,
}

/// Run the full rules engine and adapt its report into the external
/// shape. An empty job skill list short-circuits without touching the
/// engine.
pub fn score_from_skill_lists(
    user_skills: &[String],
    job_skills: &[String],
    job_description: &str,
) -> MatchOutcome {
    if job_skills.is_empty() {
        return MatchOutcome::default();
    }

    let engine = RulesEngine::new();
    let report = engine.evaluate_match(user_skills, job_skills, job_description, None);

    MatchOutcome {
        score: report.percentage,
        matched: report.matched_skills.clone(),
        missing: report.missing_skills.clone(),
        recommendations: report.recommendations.clone(),
        analysis: report,
    }
}

/// Cheap overlap-only score, no rule analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageScore {
    pub score: u8,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Coverage of the job's unique skill set by the candidate's:
/// `100 × |matched| / |job set|`, with sorted matched/missing lists.
pub fn coverage_score(user_skills: &[String], job_skills: &[String]) -> CoverageScore {
    // Blank entries are discarded here, unlike in the rules engine,
    // where they stay in the job-side denominator.
    let job_set = nonblank_skill_set(job_skills);
    if job_set.is_empty() {
        return CoverageScore::default();
    }

    let user_set = nonblank_skill_set(user_skills);

    let mut matched: Vec<String> = job_set.intersection(&user_set).cloned().collect();
    matched.sort();
    let mut missing: Vec<String> = job_set.difference(&user_set).cloned().collect();
    missing.sort();

    let score = (100.0 * matched.len() as f64 / job_set.len().max(1) as f64).round();

    CoverageScore {
        score: score.clamp(0.0, 100.0) as u8,
        matched,
        missing,
    }
}
