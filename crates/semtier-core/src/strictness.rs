//! Parsing strictness tiers.
//!
//! Every parser in this crate attempts the most restrictive tier first and
//! relaxes one tier at a time until it succeeds or the requested tier has
//! been tried.

use serde::{Deserialize, Serialize};

use crate::grammar::Relaxations;

/// Display name returned for raw values outside the enumeration.
pub const INVALID_DISPLAY_NAME: &str = "<invalid>";

/// How closely a version string must follow Semantic Versioning 2.0.0.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ParsingStrictness {
    /// Fully SemVer 2.0.0 compliant. No prefixes, suffixes, leading zeroes or
    /// foreign characters.
    #[default]
    Strict = 0,
    /// Leading zeroes in numeric components (`1.01.0`) and any
    /// non-whitespace character in build metadata (`+nightly@94149`).
    Regular = 1,
    /// Arbitrary text around the version. Only `digit.digit` is required
    /// (`Version 1.0@c`).
    Liberal = 2,
}

impl ParsingStrictness {
    /// All tiers, most restrictive first.
    pub const ALL: [Self; 3] = [Self::Strict, Self::Regular, Self::Liberal];

    /// Display name of this tier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Regular => "Regular",
            Self::Liberal => "Liberal",
        }
    }

    /// Look up a tier by its raw discriminant.
    pub const fn from_repr(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Strict),
            1 => Some(Self::Regular),
            2 => Some(Self::Liberal),
            _ => None,
        }
    }

    /// The tiers to attempt when parsing at this strictness, in order.
    pub fn attempts(self) -> &'static [Self] {
        let all: &'static [Self; 3] = &Self::ALL;
        &all[..=self as usize]
    }

    /// Grammar relaxations enabled at this tier.
    pub const fn relaxations(self) -> Relaxations {
        match self {
            Self::Strict => Relaxations::NONE,
            Self::Regular => Relaxations {
                allow_leading_zeroes: true,
                allow_any_build_chars: true,
                allow_surrounding_text: false,
            },
            Self::Liberal => Relaxations {
                allow_leading_zeroes: true,
                allow_any_build_chars: true,
                allow_surrounding_text: true,
            },
        }
    }
}

impl std::fmt::Display for ParsingStrictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for ParsingStrictness {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_repr(value).ok_or(value)
    }
}

impl std::str::FromStr for ParsingStrictness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown parsing strictness: {s}"))
    }
}

/// Display name for a raw strictness value.
///
/// Values outside the enumeration map to [`INVALID_DISPLAY_NAME`].
pub fn display_name(raw: u8) -> &'static str {
    ParsingStrictness::from_repr(raw).map_or(INVALID_DISPLAY_NAME, ParsingStrictness::as_str)
}
