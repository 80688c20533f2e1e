//! Semantic versions and version arithmetic.
//!
//! [`SemanticVersion`] parses with the same tiered grammar as
//! [`is_valid_semantic_version`](crate::is_valid_semantic_version), then
//! normalizes what it found: leading zeroes are dropped and a missing patch
//! component (only possible under `Liberal`) becomes `0`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::build_metadata::BuildMetadata;
use crate::error::{VersionError, VersionResult};
use crate::grammar::{self, VersionSpans};
use crate::pre_release::PreReleaseIdentifier;
use crate::strictness::ParsingStrictness;

/// A parsed semantic version.
///
/// Equality (`==`) includes build metadata. Use
/// [`eq_precedence`](Self::eq_precedence) to ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SemanticVersion {
    /// Major version, bumped for incompatible changes.
    pub major: u64,
    /// Minor version, bumped for compatible features.
    pub minor: u64,
    /// Patch version, bumped for compatible fixes.
    pub patch: u64,
    /// Pre-release identifiers (`-alpha.1`).
    pub pre_release: PreReleaseIdentifier,
    /// Build metadata (`+build.5`).
    pub build_metadata: BuildMetadata,
}

impl Default for SemanticVersion {
    /// `0.1.0`, the usual start of a version history.
    fn default() -> Self {
        Self {
            major: 0,
            minor: 1,
            patch: 0,
            pre_release: PreReleaseIdentifier::EMPTY,
            build_metadata: BuildMetadata::EMPTY,
        }
    }
}

impl SemanticVersion {
    /// Create a release version.
    ///
    /// `0.0.0` is not a meaningful version; it is replaced by the default
    /// `0.1.0` with a warning.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        if major == 0 && minor == 0 && patch == 0 {
            warn!("version components must not all be zero, defaulting to 0.1.0");
            return Self::default();
        }
        Self {
            major,
            minor,
            patch,
            ..Self::default()
        }
    }

    /// Replace the pre-release identifiers.
    #[must_use]
    pub fn with_pre_release(mut self, pre_release: PreReleaseIdentifier) -> Self {
        self.pre_release = pre_release;
        self
    }

    /// Replace the build metadata.
    #[must_use]
    pub fn with_build_metadata(mut self, build_metadata: BuildMetadata) -> Self {
        self.build_metadata = build_metadata;
        self
    }

    /// Parse `text`, trying each tier up to `strictness`.
    ///
    /// ```
    /// use semtier_core::{ParsingStrictness, SemanticVersion};
    ///
    /// let v = SemanticVersion::parse("Version 4.3", ParsingStrictness::Liberal).unwrap();
    /// assert_eq!(v.to_string(), "4.3.0");
    /// ```
    #[instrument(level = "debug")]
    pub fn parse(text: &str, strictness: ParsingStrictness) -> VersionResult<Self> {
        for &tier in strictness.attempts() {
            if let Some(spans) = grammar::match_version(text, tier.relaxations()) {
                let version = Self::from_spans(&spans, tier)?;
                debug!(%version, %tier, "parsed version");
                return Ok(version);
            }
        }
        Err(VersionError::InvalidVersion {
            input: text.to_string(),
            strictness,
        })
    }

    fn from_spans(spans: &VersionSpans<'_>, tier: ParsingStrictness) -> VersionResult<Self> {
        Ok(Self {
            major: component("major", spans.major)?,
            minor: component("minor", spans.minor)?,
            patch: spans.patch.map_or(Ok(0), |p| component("patch", p))?,
            pre_release: PreReleaseIdentifier::parse(spans.pre_release, tier)?,
            build_metadata: BuildMetadata::parse(spans.build, tier)?,
        })
    }

    /// Bump the major version. Resets minor and patch and strips pre-release
    /// and build metadata.
    pub fn increment_major(&mut self) -> VersionResult<()> {
        self.major = increment("major", self.major)?;
        self.minor = 0;
        self.patch = 0;
        self.clear_labels();
        Ok(())
    }

    /// Bump the minor version. Resets patch and strips pre-release and
    /// build metadata.
    pub fn increment_minor(&mut self) -> VersionResult<()> {
        self.minor = increment("minor", self.minor)?;
        self.patch = 0;
        self.clear_labels();
        Ok(())
    }

    /// Bump the patch version and strip pre-release and build metadata.
    pub fn increment_patch(&mut self) -> VersionResult<()> {
        self.patch = increment("patch", self.patch)?;
        self.clear_labels();
        Ok(())
    }

    /// Increment the trailing numeric pre-release identifier.
    ///
    /// Build metadata is always stripped. Returns `false` if the pre-release
    /// does not end in a number.
    pub fn try_increment_pre_release(&mut self) -> bool {
        self.build_metadata = BuildMetadata::EMPTY;
        self.pre_release.try_increment()
    }

    /// Apply a single bump in place.
    pub fn bump(&mut self, level: BumpLevel) -> VersionResult<()> {
        match level {
            BumpLevel::Major => self.increment_major(),
            BumpLevel::Minor => self.increment_minor(),
            BumpLevel::Patch => self.increment_patch(),
            BumpLevel::Pre => {
                if self.try_increment_pre_release() {
                    Ok(())
                } else {
                    Err(VersionError::PreReleaseNotIncrementable(
                        self.pre_release.to_string(),
                    ))
                }
            }
        }
    }

    /// The version that follows `self` at `level`.
    pub fn next_version(&self, level: BumpLevel) -> VersionResult<Self> {
        let mut next = self.clone();
        next.bump(level)?;
        Ok(next)
    }

    /// Whether the versions have equal precedence (build metadata ignored).
    pub fn eq_precedence(&self, other: &Self) -> bool {
        self.cmp_precedence(other).is_eq()
    }

    /// Total order by SemVer precedence. Build metadata is ignored.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| self.pre_release.cmp(&other.pre_release))
    }

    /// Whether this version has pre-release identifiers.
    pub const fn is_pre_release(&self) -> bool {
        !self.pre_release.is_empty()
    }

    fn clear_labels(&mut self) {
        self.pre_release = PreReleaseIdentifier::EMPTY;
        self.build_metadata = BuildMetadata::EMPTY;
    }
}

fn component(name: &'static str, digits: &str) -> VersionResult<u64> {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| VersionError::ComponentOverflow {
            component: name,
            digits: digits.to_string(),
        })
}

fn increment(name: &'static str, value: u64) -> VersionResult<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| VersionError::ComponentOverflow {
            component: name,
            digits: (u128::from(value) + 1).to_string(),
        })
}

impl PartialOrd for SemanticVersion {
    /// Precedence order. Versions with equal precedence but different build
    /// metadata are unequal and unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.cmp_precedence(other) {
            Ordering::Equal if self.build_metadata != other.build_metadata => None,
            ord => Some(ord),
        }
    }
}

impl std::fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release)?;
        }
        if !self.build_metadata.is_empty() {
            write!(f, "+{}", self.build_metadata)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for SemanticVersion {
    type Err = VersionError;

    /// Parses with [`ParsingStrictness::Strict`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, ParsingStrictness::Strict)
    }
}

impl From<SemanticVersion> for String {
    fn from(version: SemanticVersion) -> Self {
        version.to_string()
    }
}

impl TryFrom<String> for SemanticVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&semver::Version> for SemanticVersion {
    type Error = VersionError;

    fn try_from(version: &semver::Version) -> Result<Self, Self::Error> {
        Ok(Self {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            pre_release: PreReleaseIdentifier::parse(
                version.pre.as_str(),
                ParsingStrictness::Strict,
            )?,
            build_metadata: BuildMetadata::parse(
                version.build.as_str(),
                ParsingStrictness::Strict,
            )?,
        })
    }
}

impl TryFrom<&SemanticVersion> for semver::Version {
    type Error = VersionError;

    /// Fails for build metadata only accepted by relaxed tiers, such as
    /// `nightly@94149`.
    fn try_from(version: &SemanticVersion) -> Result<Self, Self::Error> {
        Ok(Self {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            pre: semver::Prerelease::new(&version.pre_release.to_string())?,
            build: semver::BuildMetadata::new(version.build_metadata.as_str())?,
        })
    }
}

/// Which part of a version to bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    /// Breaking release (X.0.0).
    Major,
    /// Feature release (x.Y.0).
    Minor,
    /// Fix release (x.y.Z).
    Patch,
    /// Next pre-release (x.y.z-rc.N+1).
    Pre,
}

impl std::fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
            Self::Pre => write!(f, "pre"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParsingStrictness::{Liberal, Regular, Strict};

    fn v(text: &str) -> SemanticVersion {
        SemanticVersion::parse(text, Strict).unwrap()
    }

    fn pre(text: &str) -> PreReleaseIdentifier {
        PreReleaseIdentifier::parse(text, Strict).unwrap()
    }

    fn build(text: &str) -> BuildMetadata {
        BuildMetadata::parse(text, Strict).unwrap()
    }

    #[test]
    fn default_is_zero_one_zero() {
        assert_eq!(SemanticVersion::default().to_string(), "0.1.0");
    }

    #[test]
    fn all_zero_falls_back_to_default() {
        assert_eq!(SemanticVersion::new(0, 0, 0), SemanticVersion::default());
        assert_eq!(SemanticVersion::new(0, 0, 1).to_string(), "0.0.1");
    }

    #[test]
    fn to_string_full() {
        let version = SemanticVersion::new(1, 2, 3)
            .with_pre_release(pre("alpha.1"))
            .with_build_metadata(build("build.5"));
        assert_eq!(version.to_string(), "1.2.3-alpha.1+build.5");
    }

    #[test]
    fn parse_strict_round_trips() {
        for text in ["1.2.3", "1.2.3-alpha", "1.2.3+build", "1.2.3-alpha.1+build.5"] {
            assert_eq!(v(text).to_string(), text);
        }
    }

    #[test]
    fn parse_zero_version_is_kept() {
        assert_eq!(v("0.0.0").to_string(), "0.0.0");
    }

    #[test]
    fn parse_failure_reports_input() {
        let err = SemanticVersion::parse("1.01.0", Strict).unwrap_err();
        assert!(matches!(
            err,
            VersionError::InvalidVersion { ref input, strictness: Strict } if input == "1.01.0"
        ));
    }

    #[test]
    fn regular_normalizes_leading_zeroes() {
        let version = SemanticVersion::parse("01.006.010-01.0build.02", Regular).unwrap();
        assert_eq!(version.to_string(), "1.6.10-1.0build.2");
    }

    #[test]
    fn regular_keeps_special_build_characters() {
        let version = SemanticVersion::parse("1.0.5+build@meta#data", Regular).unwrap();
        assert_eq!(version.build_metadata.as_str(), "build@meta#data");
    }

    #[test]
    fn liberal_fills_missing_patch() {
        let version = SemanticVersion::parse("4.3", Liberal).unwrap();
        assert_eq!(version.to_string(), "4.3.0");
    }

    #[test]
    fn liberal_fourth_number_is_pre_release() {
        let version = SemanticVersion::parse("1.2.3.4", Liberal).unwrap();
        assert_eq!(version.to_string(), "1.2.3-4");
    }

    #[test]
    fn liberal_stops_at_whitespace() {
        let version = SemanticVersion::parse("1.2.3 -build-metadata", Liberal).unwrap();
        assert_eq!(version.to_string(), "1.2.3");
    }

    #[test]
    fn liberal_extracts_embedded_version() {
        for text in [
            "Version#=1.2.3-alpha+build",
            "The version 1.2.3-alpha+build is the version we need",
        ] {
            let version = SemanticVersion::parse(text, Liberal).unwrap();
            assert_eq!(version.to_string(), "1.2.3-alpha+build", "{text}");
        }
    }

    #[test]
    fn liberal_rejects_bare_number() {
        assert!(SemanticVersion::parse("42", Liberal).is_err());
    }

    #[test]
    fn parse_prefers_most_restrictive_tier() {
        // Strict matches before Liberal can reinterpret the text.
        let version = SemanticVersion::parse("1.2.3-rc.1+build.5", Liberal).unwrap();
        assert_eq!(version.to_string(), "1.2.3-rc.1+build.5");
    }

    #[test]
    fn component_overflow_is_an_error() {
        let err = SemanticVersion::parse("99999999999999999999999.0.0", Strict).unwrap_err();
        assert!(matches!(
            err,
            VersionError::ComponentOverflow {
                component: "major",
                ..
            }
        ));
    }

    #[test]
    fn from_str_is_strict() {
        assert!("1.0.0".parse::<SemanticVersion>().is_ok());
        assert!("v1.0.0".parse::<SemanticVersion>().is_err());
    }

    #[test]
    fn increment_major_resets_everything_below() {
        let mut version = v("1.2.3-alpha+build");
        version.increment_major().unwrap();
        assert_eq!(version.to_string(), "2.0.0");
    }

    #[test]
    fn increment_minor_resets_patch() {
        let mut version = v("1.2.3-alpha+build");
        version.increment_minor().unwrap();
        assert_eq!(version.to_string(), "1.3.0");
    }

    #[test]
    fn increment_patch_strips_labels() {
        let mut version = v("1.2.3-alpha+build");
        version.increment_patch().unwrap();
        assert_eq!(version.to_string(), "1.2.4");
    }

    #[test]
    fn increment_overflow_is_an_error() {
        let mut version = SemanticVersion::new(u64::MAX, 0, 0);
        assert!(version.increment_major().is_err());
        assert_eq!(version.major, u64::MAX);
    }

    #[test]
    fn increment_pre_release_strips_build_metadata() {
        let mut version = v("1.2.3-rc.1+build");
        assert!(version.try_increment_pre_release());
        assert_eq!(version.to_string(), "1.2.3-rc.2");
    }

    #[test]
    fn increment_pre_release_fails_without_number() {
        let mut version = v("1.2.3-rc+build");
        assert!(!version.try_increment_pre_release());
        assert_eq!(version.to_string(), "1.2.3-rc");
    }

    #[test]
    fn bump_levels() {
        let version = v("0.1.0");
        assert_eq!(version.next_version(BumpLevel::Patch).unwrap().to_string(), "0.1.1");
        assert_eq!(version.next_version(BumpLevel::Minor).unwrap().to_string(), "0.2.0");
        assert_eq!(version.next_version(BumpLevel::Major).unwrap().to_string(), "1.0.0");
        assert_eq!(version.next_version(BumpLevel::Pre).unwrap().to_string(), "0.1.0-1");
    }

    #[test]
    fn bump_pre_on_alphanumeric_fails() {
        let err = v("1.0.0-beta").next_version(BumpLevel::Pre).unwrap_err();
        assert!(matches!(err, VersionError::PreReleaseNotIncrementable(ref p) if p == "beta"));
    }

    #[test]
    fn equality_includes_build_metadata() {
        assert_eq!(v("1.2.3-alpha+build"), v("1.2.3-alpha+build"));
        assert_ne!(v("1.2.3+a"), v("1.2.3+b"));
        assert!(v("1.2.3+a").eq_precedence(&v("1.2.3+b")));
    }

    #[test]
    fn precedence_chain() {
        let chain = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
            "1.0.1",
            "1.1.0",
            "2.0.0",
        ];
        for pair in chain.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} < {}", pair[0], pair[1]);
            assert!(v(pair[1]) > v(pair[0]));
        }
    }

    #[test]
    fn build_metadata_only_difference_is_unordered() {
        let a = v("1.0.0+a");
        let b = v("1.0.0+b");
        assert_eq!(a.partial_cmp(&b), None);
        assert!(!(a < b) && !(a > b));
        assert!(a <= v("1.0.0+a"));
        assert_eq!(a.cmp_precedence(&b), Ordering::Equal);
    }

    #[test]
    fn semver_interop() {
        let ours = v("1.2.3-rc.1+build.5");
        let theirs = semver::Version::try_from(&ours).unwrap();
        assert_eq!(theirs, semver::Version::parse("1.2.3-rc.1+build.5").unwrap());
        assert_eq!(SemanticVersion::try_from(&theirs).unwrap(), ours);
    }

    #[test]
    fn semver_rejects_relaxed_build_metadata() {
        let ours = SemanticVersion::parse("1.0.0+nightly@94149", Regular).unwrap();
        assert!(semver::Version::try_from(&ours).is_err());
    }

    #[test]
    fn serde_uses_version_string() {
        let json = serde_json::to_string(&v("1.2.3-rc.1")).unwrap();
        assert_eq!(json, "\"1.2.3-rc.1\"");
        let back: SemanticVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v("1.2.3-rc.1"));
        assert!(serde_json::from_str::<SemanticVersion>("\"v1\"").is_err());
    }

    #[test]
    fn bump_level_display() {
        assert_eq!(BumpLevel::Pre.to_string(), "pre");
        assert_eq!(BumpLevel::Major.to_string(), "major");
    }
}
