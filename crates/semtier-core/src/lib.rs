//! Core library for semtier.
//!
//! Semantic version validation and parsing with three strictness tiers.
//! Each tier accepts everything the previous one does:
//!
//! - `Strict` follows Semantic Versioning 2.0.0 exactly.
//! - `Regular` also allows leading zeroes and any non-whitespace build
//!   metadata characters.
//! - `Liberal` finds a version embedded in arbitrary text.
//!
//! # Modules
//!
//! - [`strictness`] - Parsing strictness tiers and display names
//! - [`grammar`] - The tiered version grammar
//! - [`validate`] - Version string validation
//! - [`version`] - Parsed versions, precedence and increments
//! - [`pre_release`] - Pre-release identifiers
//! - [`build_metadata`] - Build metadata
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use semtier_core::{ParsingStrictness, SemanticVersion, is_valid_semantic_version};
//!
//! assert!(is_valid_semantic_version("1.2.3-rc.1", ParsingStrictness::Strict));
//!
//! let version = SemanticVersion::parse("01.2.3", ParsingStrictness::Regular).unwrap();
//! assert_eq!(version.to_string(), "1.2.3");
//! ```
#![deny(unsafe_code)]

pub mod build_metadata;

pub mod config;

pub mod error;

pub mod grammar;

pub mod pre_release;

pub mod strictness;

pub mod validate;

pub mod version;

pub use build_metadata::BuildMetadata;

pub use config::{Config, ConfigLoader, LogLevel};

pub use error::{ConfigError, ConfigResult, VersionError, VersionResult};

pub use pre_release::PreReleaseIdentifier;

pub use strictness::{ParsingStrictness, display_name};

pub use validate::{is_valid_semantic_version, matching_tier};

pub use version::{BumpLevel, SemanticVersion};

// Re-export semver so downstream crates don't need a direct dependency.
pub use semver;
