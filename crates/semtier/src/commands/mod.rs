//! Command implementations

pub mod bump;

pub mod check;

pub mod info;

pub mod parse;

pub mod sort;

pub mod tiers;

use semtier_core::ParsingStrictness;
use semtier_core::config::Config;

/// Strictness from the `--strictness` flag, falling back to config.
pub fn resolve_strictness(flag: Option<ParsingStrictness>, config: &Config) -> ParsingStrictness {
    flag.unwrap_or(config.strictness)
}
