//! Build metadata (`1.0.0+build.42`).

use serde::{Deserialize, Serialize};

use crate::error::{VersionError, VersionResult};
use crate::grammar;
use crate::strictness::ParsingStrictness;

/// Build metadata attached to a version.
///
/// Compared textually. Build metadata never affects precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BuildMetadata(String);

impl BuildMetadata {
    /// No build metadata.
    pub const EMPTY: Self = Self(String::new());

    /// Parse build metadata at the given strictness.
    ///
    /// - `Strict`: dot-separated `[0-9A-Za-z-]+` identifiers.
    /// - `Regular`: any characters; surrounding whitespace is trimmed and
    ///   internal whitespace is rejected.
    /// - `Liberal`: the first whitespace-separated token.
    pub fn parse(text: &str, strictness: ParsingStrictness) -> VersionResult<Self> {
        if text.is_empty() {
            return Ok(Self::EMPTY);
        }

        let parsed = match strictness {
            ParsingStrictness::Strict => {
                grammar::is_build_metadata(text, false).then_some(text)
            }
            ParsingStrictness::Regular => {
                let trimmed = text.trim();
                grammar::is_build_metadata(trimmed, true).then_some(trimmed)
            }
            ParsingStrictness::Liberal => text.split_whitespace().next(),
        };

        parsed
            .map(|s| Self(s.to_string()))
            .ok_or_else(|| VersionError::InvalidBuildMetadata {
                input: text.to_string(),
                strictness,
            })
    }

    /// The metadata text without the leading `+`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether there is no build metadata.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for BuildMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<BuildMetadata> for String {
    fn from(build: BuildMetadata) -> Self {
        build.0
    }
}

impl TryFrom<String> for BuildMetadata {
    type Error = VersionError;

    /// Parses with [`ParsingStrictness::Regular`].
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value, ParsingStrictness::Regular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParsingStrictness::{Liberal, Regular, Strict};

    #[test]
    fn empty_is_valid_everywhere() {
        for tier in ParsingStrictness::ALL {
            assert!(BuildMetadata::parse("", tier).unwrap().is_empty());
        }
    }

    #[test]
    fn strict_identifiers() {
        assert_eq!(
            BuildMetadata::parse("exp.sha.5114f85", Strict).unwrap().as_str(),
            "exp.sha.5114f85"
        );
        assert!(BuildMetadata::parse("build@meta", Strict).is_err());
        assert!(BuildMetadata::parse("a..b", Strict).is_err());
        assert!(BuildMetadata::parse(" build", Strict).is_err());
    }

    #[test]
    fn regular_trims_and_accepts_any_characters() {
        assert_eq!(
            BuildMetadata::parse("  build@meta#data  ", Regular)
                .unwrap()
                .as_str(),
            "build@meta#data"
        );
    }

    #[test]
    fn regular_rejects_internal_whitespace() {
        let err = BuildMetadata::parse("build meta", Regular).unwrap_err();
        assert!(matches!(err, VersionError::InvalidBuildMetadata { .. }));
        assert!(BuildMetadata::parse("   ", Regular).is_err());
    }

    #[test]
    fn liberal_keeps_first_token() {
        assert_eq!(
            BuildMetadata::parse(" build@meta more words", Liberal)
                .unwrap()
                .as_str(),
            "build@meta"
        );
        assert!(BuildMetadata::parse(" \t ", Liberal).is_err());
    }

    #[test]
    fn deserialize_validates() {
        let build: BuildMetadata = serde_json::from_str("\"nightly@94149\"").unwrap();
        assert_eq!(build.as_str(), "nightly@94149");
        assert_eq!(serde_json::to_string(&build).unwrap(), "\"nightly@94149\"");
        assert!(serde_json::from_str::<BuildMetadata>("\"build meta\"").is_err());
        assert!(serde_json::from_str::<BuildMetadata>("\"   \"").is_err());
    }

    #[test]
    fn equality_is_textual() {
        let a = BuildMetadata::parse("build.1", Strict).unwrap();
        let b = BuildMetadata::parse("build.01", Strict).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "build.1");
    }
}
