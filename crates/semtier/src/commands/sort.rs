//! Sort command: order versions by precedence.

use anyhow::Context;
use clap::Args;
use tracing::{debug, instrument};

use semtier_core::config::Config;
use semtier_core::{ParsingStrictness, SemanticVersion};

/// Arguments for the `sort` subcommand.
#[derive(Args, Debug, Default)]
pub struct SortArgs {
    /// Versions to sort
    #[arg(required = true, value_name = "VERSION")]
    pub versions: Vec<String>,

    /// Most lenient tier to accept (default: from config)
    #[arg(short, long, value_enum)]
    pub strictness: Option<ParsingStrictness>,

    /// Highest precedence first
    #[arg(short, long)]
    pub reverse: bool,
}

/// Parse and sort versions. Equal precedence keeps input order.
fn sort_versions(
    versions: &[String],
    strictness: ParsingStrictness,
    reverse: bool,
) -> anyhow::Result<Vec<SemanticVersion>> {
    let mut parsed = versions
        .iter()
        .map(|text| {
            SemanticVersion::parse(text, strictness)
                .with_context(|| format!("failed to parse '{text}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if reverse {
        parsed.sort_by(|a, b| b.cmp_precedence(a));
    } else {
        parsed.sort_by(SemanticVersion::cmp_precedence);
    }
    Ok(parsed)
}

/// Print the versions in precedence order.
#[instrument(name = "cmd_sort", skip_all, fields(json_output))]
pub fn cmd_sort(args: SortArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let strictness = super::resolve_strictness(args.strictness, config);
    debug!(json_output = global_json, %strictness, reverse = args.reverse, "executing sort command");

    let sorted = sort_versions(&args.versions, strictness, args.reverse)?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
    } else {
        for version in &sorted {
            println!("{version}");
        }
    }

    Ok(())
}
