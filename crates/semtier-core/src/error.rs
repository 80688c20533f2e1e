//! Error types for semtier-core

use thiserror::Error;

use crate::strictness::ParsingStrictness;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from parsing or converting semantic versions.
#[derive(Error, Debug)]
pub enum VersionError {
    /// No strictness tier up to the requested one matched the input.
    #[error("'{input}' is not a valid semantic version ({strictness} parsing)")]
    InvalidVersion {
        /// The rejected input.
        input: String,
        /// The most lenient tier that was attempted.
        strictness: ParsingStrictness,
    },

    /// The pre-release part could not be parsed.
    #[error("'{input}' is not a valid pre-release identifier ({strictness} parsing)")]
    InvalidPreRelease {
        /// The rejected input.
        input: String,
        /// The tier that was attempted.
        strictness: ParsingStrictness,
    },

    /// The build metadata could not be parsed.
    #[error("'{input}' is not valid build metadata ({strictness} parsing)")]
    InvalidBuildMetadata {
        /// The rejected input.
        input: String,
        /// The tier that was attempted.
        strictness: ParsingStrictness,
    },

    /// A numeric component does not fit in 64 bits.
    #[error("{component} version {digits} is out of range")]
    ComponentOverflow {
        /// Which component overflowed (`major`, `minor` or `patch`).
        component: &'static str,
        /// The digits as written.
        digits: String,
    },

    /// The pre-release does not end in a numeric identifier.
    #[error("pre-release '{0}' does not end in a number and cannot be incremented")]
    PreReleaseNotIncrementable(String),

    /// Conversion to or from the `semver` crate failed.
    #[error("not representable as a semver version: {0}")]
    Semver(#[from] semver::Error),
}

/// Result alias for version operations.
pub type VersionResult<T> = Result<T, VersionError>;
