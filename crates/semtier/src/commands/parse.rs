//! Parse command: show the normalized parts of a version.

use anyhow::Context;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use semtier_core::config::Config;
use semtier_core::{ParsingStrictness, SemanticVersion, matching_tier};

/// Arguments for the `parse` subcommand.
#[derive(Args, Debug, Default)]
pub struct ParseArgs {
    /// Version string to parse
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// Most lenient tier to accept (default: from config)
    #[arg(short, long, value_enum)]
    pub strictness: Option<ParsingStrictness>,
}

#[derive(Debug, Serialize)]
struct ParsedVersion {
    input: String,
    normalized: String,
    tier: Option<ParsingStrictness>,
    major: u64,
    minor: u64,
    patch: u64,
    pre_release: Vec<String>,
    build_metadata: String,
    /// Whether the `semver` crate accepts the normalized version.
    semver_compatible: bool,
}

impl ParsedVersion {
    fn new(input: &str, version: &SemanticVersion, strictness: ParsingStrictness) -> Self {
        Self {
            input: input.to_string(),
            normalized: version.to_string(),
            tier: matching_tier(input, strictness),
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            pre_release: version.pre_release.identifiers().to_vec(),
            build_metadata: version.build_metadata.to_string(),
            semver_compatible: semtier_core::semver::Version::try_from(version).is_ok(),
        }
    }
}

/// Parse a version and print its components.
#[instrument(name = "cmd_parse", skip_all, fields(json_output))]
pub fn cmd_parse(args: ParseArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let strictness = super::resolve_strictness(args.strictness, config);
    debug!(json_output = global_json, %strictness, "executing parse command");

    let version = SemanticVersion::parse(&args.version, strictness)
        .with_context(|| format!("failed to parse '{}'", args.version))?;
    let parsed = ParsedVersion::new(&args.version, &version, strictness);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    println!("{}", parsed.normalized.green().bold());
    if let Some(tier) = parsed.tier {
        println!("{}: {}", "Tier".dimmed(), tier);
    }
    println!("{}: {}", "Major".dimmed(), parsed.major);
    println!("{}: {}", "Minor".dimmed(), parsed.minor);
    println!("{}: {}", "Patch".dimmed(), parsed.patch);
    if !parsed.pre_release.is_empty() {
        println!(
            "{}: {}",
            "Pre-release".dimmed(),
            parsed.pre_release.join(".").cyan()
        );
    }
    if !parsed.build_metadata.is_empty() {
        println!(
            "{}: {}",
            "Build metadata".dimmed(),
            parsed.build_metadata.cyan()
        );
    }
    let compat = if parsed.semver_compatible {
        "yes".green().to_string()
    } else {
        "no".yellow().to_string()
    };
    println!("{}: {compat}", "semver crate compatible".dimmed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(input: &str, strictness: ParsingStrictness) -> ParsedVersion {
        let version = SemanticVersion::parse(input, strictness).unwrap();
        ParsedVersion::new(input, &version, strictness)
    }

    #[test]
    fn normalizes_regular_input() {
        let p = parsed("01.006.010-01.0build.02", ParsingStrictness::Regular);
        assert_eq!(p.normalized, "1.6.10-1.0build.2");
        assert_eq!(p.tier, Some(ParsingStrictness::Regular));
        assert_eq!(p.pre_release, ["1", "0build", "2"]);
        assert!(p.semver_compatible);
    }

    #[test]
    fn relaxed_build_metadata_is_not_semver_compatible() {
        let p = parsed("1.0.0+nightly@94149", ParsingStrictness::Regular);
        assert_eq!(p.build_metadata, "nightly@94149");
        assert!(!p.semver_compatible);
    }

    #[test]
    fn cmd_parse_rejects_invalid() {
        let args = ParseArgs {
            version: "1.01.0".to_string(),
            strictness: Some(ParsingStrictness::Strict),
        };
        assert!(cmd_parse(args, false, &Config::default()).is_err());
    }

    #[test]
    fn cmd_parse_json() {
        let args = ParseArgs {
            version: "Version 1.0@c".to_string(),
            strictness: Some(ParsingStrictness::Liberal),
        };
        assert!(cmd_parse(args, true, &Config::default()).is_ok());
    }
}
