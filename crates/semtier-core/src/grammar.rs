//! Tiered semantic version grammar.
//!
//! A single matcher implements all three strictness tiers. Each tier is a
//! set of [`Relaxations`] layered over the canonical SemVer 2.0.0 grammar:
//!
//! ```text
//! MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]
//! ```
//!
//! The matcher only locates and validates spans; it never allocates.
//! Normalization (stripping leading zeroes, filling in a missing patch)
//! happens in [`crate::version`].

/// Grammar relaxations layered over the canonical SemVer grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relaxations {
    /// Numeric components and numeric pre-release identifiers may carry
    /// leading zeroes.
    pub allow_leading_zeroes: bool,
    /// Build metadata may contain any non-whitespace character.
    pub allow_any_build_chars: bool,
    /// The version may be embedded in arbitrary text. Only `digit.digit`
    /// is required; the patch component becomes optional.
    pub allow_surrounding_text: bool,
}

impl Relaxations {
    /// The canonical grammar with no relaxations.
    pub const NONE: Self = Self {
        allow_leading_zeroes: false,
        allow_any_build_chars: false,
        allow_surrounding_text: false,
    };
}

/// Spans of a matched version, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionSpans<'a> {
    /// Major component digits.
    pub major: &'a str,
    /// Minor component digits.
    pub minor: &'a str,
    /// Patch component digits. Only absent when surrounding text is allowed.
    pub patch: Option<&'a str>,
    /// Dot-separated pre-release identifiers without the leading `-`.
    /// Empty when the version has no pre-release.
    pub pre_release: &'a str,
    /// Build metadata without the leading `+`. Empty when absent.
    pub build: &'a str,
}

/// Match `input` against the grammar with the given relaxations.
pub fn match_version(input: &str, relax: Relaxations) -> Option<VersionSpans<'_>> {
    if relax.allow_surrounding_text {
        match_embedded(input, relax)
    } else {
        match_anchored(input, relax)
    }
}

/// Whether `ident` is a valid pre-release identifier.
pub fn is_pre_release_identifier(ident: &str, allow_leading_zeroes: bool) -> bool {
    if ident.is_empty() || !ident.bytes().all(is_identifier_byte) {
        return false;
    }
    if ident.bytes().all(|b| b.is_ascii_digit()) {
        return allow_leading_zeroes || !has_leading_zero(ident);
    }
    true
}

/// Whether `ident` is a valid (strict) build metadata identifier.
pub fn is_build_identifier(ident: &str) -> bool {
    !ident.is_empty() && ident.bytes().all(is_identifier_byte)
}

/// Whether `text` is valid build metadata under the given relaxations.
pub fn is_build_metadata(text: &str, allow_any_build_chars: bool) -> bool {
    if allow_any_build_chars {
        !text.is_empty() && !text.chars().any(char::is_whitespace)
    } else {
        text.split('.').all(is_build_identifier)
    }
}

const fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

fn has_leading_zero(digits: &str) -> bool {
    digits.len() > 1 && digits.starts_with('0')
}

fn match_anchored(input: &str, relax: Relaxations) -> Option<VersionSpans<'_>> {
    let mut cursor = Cursor::new(input);

    let major = cursor.numeric(relax.allow_leading_zeroes)?;
    cursor.expect(b'.')?;
    let minor = cursor.numeric(relax.allow_leading_zeroes)?;
    cursor.expect(b'.')?;
    let patch = cursor.numeric(relax.allow_leading_zeroes)?;

    let mut pre_release = "";
    if cursor.eat(b'-') {
        pre_release = cursor.pre_release(relax.allow_leading_zeroes)?;
    }

    let mut build = "";
    if cursor.eat(b'+') {
        build = cursor.take_rest();
        if !is_build_metadata(build, relax.allow_any_build_chars) {
            return None;
        }
    }

    cursor.at_end().then_some(VersionSpans {
        major,
        minor,
        patch: Some(patch),
        pre_release,
        build,
    })
}

fn match_embedded(input: &str, relax: Relaxations) -> Option<VersionSpans<'_>> {
    let start = find_core_start(input)?;
    let mut cursor = Cursor::new(&input[start..]);

    // find_core_start guarantees digits '.' digits here
    let major = cursor.digits()?;
    cursor.expect(b'.')?;
    let minor = cursor.digits()?;

    let mut patch = None;
    if cursor.peek() == Some(b'.') && cursor.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
        cursor.advance(1);
        patch = cursor.digits();
    }

    let mut pre_release = "";
    let checkpoint = cursor.pos;
    let lead = cursor.peek();
    if matches!(lead, Some(b'-' | b'.')) {
        cursor.advance(1);
    }
    if cursor.peek().is_some_and(is_identifier_byte) {
        pre_release = cursor.pre_release_prefix();
    } else {
        cursor.pos = checkpoint;
    }

    let mut build = "";
    if cursor.peek() == Some(b'+') {
        let candidate = cursor.rest()[1..]
            .split(char::is_whitespace)
            .next()
            .unwrap_or_default();
        if !candidate.is_empty() {
            build = candidate;
        }
    }

    Some(VersionSpans {
        major,
        minor,
        patch,
        pre_release,
        build,
    })
}

/// Byte offset of the first `digit+.digit+` in `input`.
fn find_core_start(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if bytes.get(i) == Some(&b'.') && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            return Some(run_start);
        }
    }
    None
}

/// Byte cursor over an ASCII grammar. Non-ASCII bytes never match a
/// grammar byte, so slicing only ever happens on ASCII boundaries.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    const fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, b: u8) -> Option<()> {
        self.eat(b).then_some(())
    }

    fn at_end(&self) -> bool {
        self.pos == self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn take_rest(&mut self) -> &'a str {
        let rest = self.rest();
        self.pos = self.input.len();
        rest
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn digits(&mut self) -> Option<&'a str> {
        let run = self.take_while(|b| b.is_ascii_digit());
        (!run.is_empty()).then_some(run)
    }

    fn numeric(&mut self, allow_leading_zeroes: bool) -> Option<&'a str> {
        let run = self.digits()?;
        (allow_leading_zeroes || !has_leading_zero(run)).then_some(run)
    }

    /// Pre-release identifiers up to `+` or end of input, all validated.
    fn pre_release(&mut self, allow_leading_zeroes: bool) -> Option<&'a str> {
        let span = self.take_while(|b| b != b'+');
        span.split('.')
            .all(|ident| is_pre_release_identifier(ident, allow_leading_zeroes))
            .then_some(span)
    }

    /// Longest run of `ident(.ident)*` starting at the cursor. A trailing
    /// dot that does not start another identifier is left unconsumed.
    fn pre_release_prefix(&mut self) -> &'a str {
        let start = self.pos;
        loop {
            self.take_while(is_identifier_byte);
            if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(is_identifier_byte) {
                self.pos += 1;
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParsingStrictness;

    fn strict(input: &str) -> Option<VersionSpans<'_>> {
        match_version(input, ParsingStrictness::Strict.relaxations())
    }

    fn regular(input: &str) -> Option<VersionSpans<'_>> {
        match_version(input, ParsingStrictness::Regular.relaxations())
    }

    fn liberal(input: &str) -> Option<VersionSpans<'_>> {
        match_version(input, ParsingStrictness::Liberal.relaxations())
    }

    #[test]
    fn strict_full_version_spans() {
        let spans = strict("1.2.3-alpha.1+build.5").unwrap();
        assert_eq!(spans.major, "1");
        assert_eq!(spans.minor, "2");
        assert_eq!(spans.patch, Some("3"));
        assert_eq!(spans.pre_release, "alpha.1");
        assert_eq!(spans.build, "build.5");
    }

    #[test]
    fn strict_rejects_leading_zeroes() {
        assert!(strict("01.0.0").is_none());
        assert!(strict("1.0.0-01").is_none());
        assert!(strict("1.0.0-0a").is_some());
        assert!(strict("1.0.0+001").is_some());
    }

    #[test]
    fn strict_rejects_empty_identifiers() {
        assert!(strict("1.0.0-").is_none());
        assert!(strict("1.0.0-a..b").is_none());
        assert!(strict("1.0.0+").is_none());
        assert!(strict("1.0.0+a.").is_none());
    }

    #[test]
    fn strict_rejects_missing_components() {
        assert!(strict("1.0").is_none());
        assert!(strict("1").is_none());
        assert!(strict("1.2.3.4").is_none());
        assert!(strict("").is_none());
    }

    #[test]
    fn hyphens_inside_pre_release() {
        let spans = strict("1.0.0-x-y-z.--").unwrap();
        assert_eq!(spans.pre_release, "x-y-z.--");
    }

    #[test]
    fn regular_accepts_leading_zeroes() {
        let spans = regular("01.006.010-01.0build.02").unwrap();
        assert_eq!(spans.major, "01");
        assert_eq!(spans.pre_release, "01.0build.02");
    }

    #[test]
    fn regular_build_accepts_any_non_whitespace() {
        let spans = regular("1.0.0-alpha.30+nightly.346@94149").unwrap();
        assert_eq!(spans.build, "nightly.346@94149");
        assert!(regular("1.0.5+build@meta#data").is_some());
        assert!(regular("1.0.5+build meta").is_none());
        assert!(regular("1.0.5+").is_none());
    }

    #[test]
    fn build_metadata_runs_to_end_of_input() {
        let spans = strict("1.1.2+meta").unwrap();
        assert_eq!(spans.build, "meta");
        assert_eq!(spans.pre_release, "");
        let spans = strict("1.0.0-rc.1+build.1").unwrap();
        assert_eq!((spans.pre_release, spans.build), ("rc.1", "build.1"));
    }

    #[test]
    fn regular_stays_anchored() {
        assert!(regular("v1.0.0").is_none());
        assert!(regular("1.0.0 ").is_none());
        assert!(regular("4.0").is_none());
        assert!(regular("1.2.3.4").is_none());
    }

    #[test]
    fn liberal_finds_embedded_version() {
        let spans = liberal("The version 1.2.3-alpha+build is the version we need").unwrap();
        assert_eq!(spans.major, "1");
        assert_eq!(spans.patch, Some("3"));
        assert_eq!(spans.pre_release, "alpha");
        assert_eq!(spans.build, "build");
    }

    #[test]
    fn liberal_requires_digit_dot_digit() {
        assert!(liberal("42").is_none());
        assert!(liberal("version").is_none());
        assert!(liberal("1.").is_none());
        assert!(liberal(".5").is_none());
        let spans = liberal("Version 1.0@c").unwrap();
        assert_eq!((spans.major, spans.minor, spans.patch), ("1", "0", None));
        assert_eq!(spans.pre_release, "");
    }

    #[test]
    fn liberal_skips_digit_runs_without_dot() {
        let spans = liberal("build 7 of 2.4").unwrap();
        assert_eq!((spans.major, spans.minor), ("2", "4"));
    }

    #[test]
    fn liberal_fourth_component_becomes_pre_release() {
        let spans = liberal("1.2.3.4").unwrap();
        assert_eq!(spans.patch, Some("3"));
        assert_eq!(spans.pre_release, "4");
    }

    #[test]
    fn liberal_stops_at_whitespace() {
        let spans = liberal("1.2.3 -build-metadata").unwrap();
        assert_eq!(spans.pre_release, "");
        assert_eq!(spans.build, "");
    }

    #[test]
    fn liberal_pre_release_without_hyphen() {
        let spans = liberal("1.0b").unwrap();
        assert_eq!(spans.patch, None);
        assert_eq!(spans.pre_release, "b");
    }

    #[test]
    fn liberal_ignores_dangling_separators() {
        let spans = liberal("1.2.3-+").unwrap();
        assert_eq!(spans.pre_release, "");
        assert_eq!(spans.build, "");

        let spans = liberal("1.2.3-rc..x").unwrap();
        assert_eq!(spans.pre_release, "rc");
    }

    #[test]
    fn non_ascii_input_never_panics() {
        assert!(strict("1.0.0-ä").is_none());
        assert!(regular("1.0.0+ä").is_some());
        let spans = liberal("¿1.2.3-ñ?").unwrap();
        assert_eq!(spans.pre_release, "");
    }

    #[test]
    fn identifier_rules() {
        assert!(is_pre_release_identifier("0", false));
        assert!(!is_pre_release_identifier("00", false));
        assert!(is_pre_release_identifier("00", true));
        assert!(is_pre_release_identifier("0alpha", false));
        assert!(!is_pre_release_identifier("", true));
        assert!(!is_pre_release_identifier("a_b", true));
        assert!(is_build_identifier("007"));
        assert!(!is_build_identifier("a@b"));
    }
}
