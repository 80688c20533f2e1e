//! Check command: report whether each input is a valid version.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use semtier_core::config::Config;
use semtier_core::{ParsingStrictness, matching_tier};

/// Arguments for the `check` subcommand.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Version strings to check
    #[arg(required = true, value_name = "VERSION")]
    pub versions: Vec<String>,

    /// Most lenient tier to accept (default: from config)
    #[arg(short, long, value_enum)]
    pub strictness: Option<ParsingStrictness>,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    input: String,
    valid: bool,
    /// Most restrictive tier that accepted the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<ParsingStrictness>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    strictness: ParsingStrictness,
    all_valid: bool,
    results: Vec<CheckResult>,
}

fn check_versions(versions: &[String], strictness: ParsingStrictness) -> CheckReport {
    let results: Vec<CheckResult> = versions
        .iter()
        .map(|input| {
            let tier = matching_tier(input, strictness);
            CheckResult {
                input: input.clone(),
                valid: tier.is_some(),
                tier,
            }
        })
        .collect();
    CheckReport {
        strictness,
        all_valid: results.iter().all(|r| r.valid),
        results,
    }
}

/// Check each version and fail if any is invalid.
#[instrument(name = "cmd_check", skip_all, fields(json_output))]
pub fn cmd_check(args: CheckArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let strictness = super::resolve_strictness(args.strictness, config);
    debug!(json_output = global_json, %strictness, count = args.versions.len(), "executing check command");

    let report = check_versions(&args.versions, strictness);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for result in &report.results {
            match result.tier {
                Some(tier) => println!(
                    "  {} {} {}",
                    "✓".green(),
                    result.input.bold(),
                    format!("({tier})").dimmed()
                ),
                None => println!(
                    "  {} {} {}",
                    "✗".red(),
                    result.input.bold(),
                    format!("(invalid at {strictness})").red()
                ),
            }
        }
    }

    if report.all_valid {
        Ok(())
    } else {
        let invalid = report.results.iter().filter(|r| !r.valid).count();
        Err(anyhow::anyhow!(
            "{invalid} of {} version(s) invalid at {strictness} strictness",
            report.results.len()
        ))
    }
}
