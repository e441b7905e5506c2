use clap::{Parser, ValueEnum};
use dotenvy::dotenv;
use tracing::info;

use fit_core::engine::{EngineConfig, RulesEngine};
use fit_core::logging::init_logging;
use fit_core::scoring::MatchOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "fit-match", about = "Score a candidate's skills against a job's requirements")]
struct Cli {
    /// Candidate skills, comma separated
    #[arg(long, env = "FIT_USER_SKILLS")]
    user_skills: String,

    /// Job skills, comma separated
    #[arg(long, env = "FIT_JOB_SKILLS")]
    job_skills: String,

    /// Raw job description text (context passthrough)
    #[arg(long, env = "FIT_JOB_DESCRIPTION", default_value = "")]
    job_description: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn main() {
    dotenv().ok();
    init_logging("fit-match");

    let cli = Cli::parse();

    let user_skills = split_skills(&cli.user_skills);
    let job_skills = split_skills(&cli.job_skills);

    info!(
        user_skills = user_skills.len(),
        job_skills = job_skills.len(),
        "evaluating match"
    );

    let outcome = if job_skills.is_empty() {
        MatchOutcome::default()
    } else {
        let engine = RulesEngine::with_config(EngineConfig::from_env());
        let report = engine.evaluate_match(&user_skills, &job_skills, &cli.job_description, None);
        MatchOutcome {
            score: report.percentage,
            matched: report.matched_skills.clone(),
            missing: report.missing_skills.clone(),
            recommendations: report.recommendations.clone(),
            analysis: report,
        }
    };

    match cli.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to serialize outcome: {err}");
                std::process::exit(1);
            }
        },
        OutputFormat::Text => print_text(&outcome),
    }
}

fn print_text(outcome: &MatchOutcome) {
    println!("Match score: {}%", outcome.score);

    if !outcome.matched.is_empty() {
        println!("\nMatched skills:");
        for skill in &outcome.matched {
            println!("  + {skill}");
        }
    }

    if !outcome.missing.is_empty() {
        println!("\nMissing skills:");
        for skill in &outcome.missing {
            println!("  - {skill}");
        }
    }

    if !outcome.analysis.rule_results.is_empty() {
        println!("\nRule breakdown:");
        for result in &outcome.analysis.rule_results {
            println!(
                "  {:<18} score {:>5.1} (weight {:.1}): {}",
                result.rule_name, result.score, result.weight, result.explanation
            );
        }
    }

    if !outcome.recommendations.is_empty() {
        println!("\nRecommendations:");
        for line in &outcome.recommendations {
            println!("  {line}");
        }
    }
}
