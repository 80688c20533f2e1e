//! Semantic version string validation.

use tracing::{instrument, trace};

use crate::grammar;
use crate::strictness::ParsingStrictness;

/// Check whether `candidate` is a valid semantic version at `strictness`.
///
/// Tiers are attempted from [`ParsingStrictness::Strict`] up to and
/// including `strictness`, stopping at the first match. A string valid at
/// one tier is therefore valid at every more lenient tier.
///
/// Malformed input, including the empty string, yields `false`.
///
/// ```
/// use semtier_core::{ParsingStrictness, is_valid_semantic_version};
///
/// assert!(is_valid_semantic_version("1.0.0", ParsingStrictness::Strict));
/// assert!(!is_valid_semantic_version("1.01.0", ParsingStrictness::Strict));
/// assert!(is_valid_semantic_version("1.01.0", ParsingStrictness::Regular));
/// assert!(is_valid_semantic_version("Version 1.0@c", ParsingStrictness::Liberal));
/// ```
#[instrument(level = "trace")]
pub fn is_valid_semantic_version(candidate: &str, strictness: ParsingStrictness) -> bool {
    matching_tier(candidate, strictness).is_some()
}

/// The most restrictive tier, up to `strictness`, at which `candidate`
/// is valid.
pub fn matching_tier(candidate: &str, strictness: ParsingStrictness) -> Option<ParsingStrictness> {
    let tier = strictness
        .attempts()
        .iter()
        .copied()
        .find(|tier| grammar::match_version(candidate, tier.relaxations()).is_some());
    trace!(?tier, "validation finished");
    tier
}
