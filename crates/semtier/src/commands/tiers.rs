//! Tiers command: list the parsing strictness tiers.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use semtier_core::ParsingStrictness;
use semtier_core::config::Config;

/// Arguments for the `tiers` subcommand.
#[derive(Args, Debug, Default)]
pub struct TiersArgs {
    // Uses global --json flag for structured output
}

#[derive(Debug, Serialize)]
struct TierInfo {
    name: ParsingStrictness,
    display_name: &'static str,
    value: u8,
    summary: &'static str,
    example: &'static str,
    default: bool,
}

const fn describe(tier: ParsingStrictness) -> (&'static str, &'static str) {
    match tier {
        ParsingStrictness::Strict => ("Semantic Versioning 2.0.0 exactly", "1.0.0-rc.1+build.5"),
        ParsingStrictness::Regular => (
            "Leading zeroes and any non-whitespace build metadata",
            "1.01.0+nightly@94149",
        ),
        ParsingStrictness::Liberal => ("Version embedded in surrounding text", "Version 1.0@c"),
    }
}

fn tier_infos(configured: ParsingStrictness) -> Vec<TierInfo> {
    ParsingStrictness::ALL
        .into_iter()
        .map(|tier| {
            let (summary, example) = describe(tier);
            let value = tier as u8;
            TierInfo {
                name: tier,
                display_name: semtier_core::display_name(value),
                value,
                summary,
                example,
                default: tier == configured,
            }
        })
        .collect()
}

/// List the tiers, most restrictive first.
#[instrument(name = "cmd_tiers", skip_all, fields(json_output))]
pub fn cmd_tiers(_args: TiersArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing tiers command");

    let tiers = tier_infos(config.strictness);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&tiers)?);
    } else {
        for tier in &tiers {
            let marker = if tier.default { "*" } else { " " };
            println!(
                "{marker} {} {}",
                tier.display_name.bold(),
                tier.summary.dimmed()
            );
            println!("    e.g. {}", tier.example.cyan());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_all_tiers_in_order() {
        let tiers = tier_infos(ParsingStrictness::Strict);
        let names: Vec<_> = tiers.iter().map(|t| t.display_name).collect();
        assert_eq!(names, ["Strict", "Regular", "Liberal"]);
        assert!(tiers[0].default);
        assert!(!tiers[2].default);
    }

    #[test]
    fn examples_are_valid_at_their_tier_only() {
        for tier in tier_infos(ParsingStrictness::Strict) {
            assert_eq!(
                semtier_core::matching_tier(tier.example, ParsingStrictness::Liberal),
                Some(tier.name),
                "{}",
                tier.example
            );
        }
    }

    #[test]
    fn cmd_tiers_succeeds() {
        assert!(cmd_tiers(TiersArgs::default(), true, &Config::default()).is_ok());
    }
}
