//! Pre-release identifiers (`1.0.0-alpha.1`).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{VersionError, VersionResult};
use crate::grammar;
use crate::strictness::ParsingStrictness;

/// The pre-release part of a semantic version: dot-separated identifiers.
///
/// Numeric identifiers are stored without leading zeroes, so equality and
/// precedence agree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PreReleaseIdentifier {
    identifiers: Vec<String>,
}

impl PreReleaseIdentifier {
    /// The empty pre-release (a release version).
    pub const EMPTY: Self = Self {
        identifiers: Vec::new(),
    };

    /// Parse dot-separated identifiers.
    ///
    /// Empty text is the empty pre-release. `Regular` and `Liberal` accept
    /// leading zeroes in numeric identifiers and strip them; `Liberal` also
    /// drops empty identifiers (`alpha..1`).
    pub fn parse(text: &str, strictness: ParsingStrictness) -> VersionResult<Self> {
        if text.is_empty() {
            return Ok(Self::EMPTY);
        }

        let relax = strictness.relaxations();
        let mut identifiers = Vec::new();
        for ident in text.split('.') {
            if ident.is_empty() && relax.allow_surrounding_text {
                continue;
            }
            if !grammar::is_pre_release_identifier(ident, relax.allow_leading_zeroes) {
                return Err(VersionError::InvalidPreRelease {
                    input: text.to_string(),
                    strictness,
                });
            }
            identifiers.push(normalize_numeric(ident).to_string());
        }
        Ok(Self { identifiers })
    }

    /// The individual identifiers, in order.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Whether there are no identifiers.
    pub const fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Increment the trailing numeric identifier.
    ///
    /// An empty pre-release becomes `1`. Returns `false` and leaves the
    /// identifier unchanged if the last identifier is not numeric.
    pub fn try_increment(&mut self) -> bool {
        let Some(last) = self.identifiers.last_mut() else {
            self.identifiers.push("1".to_string());
            return true;
        };
        match numeric_value(last).and_then(|n| n.checked_add(1)) {
            Some(next) => {
                *last = next.to_string();
                true
            }
            None => {
                debug!(identifier = %last, "pre-release not incrementable");
                false
            }
        }
    }
}

impl std::fmt::Display for PreReleaseIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.identifiers.join("."))
    }
}

impl From<PreReleaseIdentifier> for String {
    fn from(pre_release: PreReleaseIdentifier) -> Self {
        pre_release.to_string()
    }
}

impl TryFrom<String> for PreReleaseIdentifier {
    type Error = VersionError;

    /// Parses with [`ParsingStrictness::Regular`], normalizing leading zeroes.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value, ParsingStrictness::Regular)
    }
}

impl Ord for PreReleaseIdentifier {
    /// SemVer 2.0.0 precedence. A release (empty pre-release) outranks any
    /// pre-release. A longer identifier list outranks its own prefix.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        self.identifiers
            .iter()
            .zip(&other.identifiers)
            .map(|(a, b)| compare_identifiers(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| self.identifiers.len().cmp(&other.identifiers.len()))
    }
}

impl PartialOrd for PreReleaseIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn is_numeric(ident: &str) -> bool {
    !ident.is_empty() && ident.bytes().all(|b| b.is_ascii_digit())
}

fn numeric_value(ident: &str) -> Option<u64> {
    if is_numeric(ident) {
        ident.parse().ok()
    } else {
        None
    }
}

fn normalize_numeric(ident: &str) -> &str {
    if is_numeric(ident) {
        let trimmed = ident.trim_start_matches('0');
        if trimmed.is_empty() { "0" } else { trimmed }
    } else {
        ident
    }
}

/// Numeric identifiers rank below alphanumeric ones and compare by value.
/// Normalized numerics have no leading zeroes, so length then text order
/// is value order without any overflow.
fn compare_identifiers(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}
