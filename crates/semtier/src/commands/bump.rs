//! Bump command: print the next version at a given level.

use anyhow::Context;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use semtier_core::config::Config;
use semtier_core::{BumpLevel, ParsingStrictness, SemanticVersion};

/// Arguments for the `bump` subcommand.
#[derive(Args, Debug)]
pub struct BumpArgs {
    /// Current version
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// Which part to bump
    #[arg(value_enum, value_name = "LEVEL")]
    pub level: BumpLevel,

    /// Most lenient tier to accept (default: from config)
    #[arg(short, long, value_enum)]
    pub strictness: Option<ParsingStrictness>,
}

/// Execute the bump command.
#[instrument(name = "cmd_bump", skip_all, fields(json_output))]
pub fn cmd_bump(args: BumpArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let strictness = super::resolve_strictness(args.strictness, config);
    debug!(json_output = global_json, %strictness, level = %args.level, "executing bump command");

    let previous = SemanticVersion::parse(&args.version, strictness)
        .with_context(|| format!("failed to parse '{}'", args.version))?;
    let next = previous
        .next_version(args.level)
        .with_context(|| format!("cannot bump {previous} at level {}", args.level))?;

    if global_json {
        let bump_json = serde_json::json!({
            "previous": previous.to_string(),
            "next": next.to_string(),
            "level": args.level,
        });
        println!("{}", serde_json::to_string_pretty(&bump_json)?);
    } else {
        println!(
            "{} → {}",
            previous.to_string().dimmed(),
            next.to_string().green().bold()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(version: &str, level: BumpLevel) -> BumpArgs {
        BumpArgs {
            version: version.to_string(),
            level,
            strictness: None,
        }
    }

    #[test]
    fn bump_minor_succeeds() {
        assert!(cmd_bump(args("1.2.3", BumpLevel::Minor), false, &Config::default()).is_ok());
    }

    #[test]
    fn bump_pre_without_number_fails() {
        let result = cmd_bump(args("1.2.3-beta", BumpLevel::Pre), true, &Config::default());
        assert!(result.is_err());
    }

    #[test]
    fn bump_respects_config_strictness() {
        let config = Config {
            strictness: ParsingStrictness::Liberal,
            ..Config::default()
        };
        assert!(cmd_bump(args("v4.3", BumpLevel::Patch), false, &config).is_ok());
        assert!(cmd_bump(args("v4.3", BumpLevel::Patch), false, &Config::default()).is_err());
    }
}
