//! Client-side content filter for marketplace text.
//!
//! Listing descriptions and chat messages are scanned before they are
//! published or rendered, to keep contact details and fraud bait off
//! the public surface. Deals that bypass the in-app contact flow are
//! where the scams happen, so phone numbers, email addresses, and
//! off-platform links get flagged alongside an operator-curated list
//! of banned terms.
//!
//! The scan here is advisory. The backend runs its own pass on
//! publish; this one exists so the app can warn or mask before the
//! text ever leaves the device.

use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Result type for moderation operations.
pub type ModerationResult<T> = Result<T, ModerationError>;

/// Errors from building filter patterns.
#[derive(Debug, Error)]
pub enum ModerationError {
    /// A custom pattern is not valid regex syntax.
    #[error("invalid filter pattern")]
    InvalidPattern(#[from] regex::Error),
}

/// What a span of text was flagged as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// A term from the banned-terms list, or a custom pattern.
    BannedTerm,
    /// Something that looks like a phone number.
    PhoneNumber,
    /// An email address.
    EmailAddress,
    /// A link leading off the platform.
    ExternalLink,
}

/// A flagged span, with byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterMatch {
    pub kind: MatchKind,
    /// The matched text.
    pub text: String,
    /// Byte offset where the match starts.
    pub start: usize,
    /// Byte offset one past where the match ends.
    pub end: usize,
}

/// Outcome of scanning a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing objectionable found.
    Clean,
    /// One or more spans were flagged, ordered by position.
    Flagged(Vec<FilterMatch>),
}

impl Verdict {
    /// Returns true if nothing was flagged.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }
}

struct Detector {
    kind: MatchKind,
    pattern: Regex,
}

/// Scans text for contact details, links, and banned terms.
///
/// Every detector runs over the whole text; matches within one
/// detector are non-overlapping and left-to-right, matches from
/// different detectors may overlap (a WhatsApp link also contains a
/// phone number).
pub struct ContentFilter {
    detectors: Vec<Detector>,
}

// Nine or more digits with optional separators and an optional
// leading plus, capped at the E.164 maximum of 15. Covers
// "+225 07 08 09 10 11" as well as bare local formats.
const PHONE_PATTERN: &str = r"\+?\d(?:[\s().\-/]*\d){8,14}";

const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}";

// Scheme-prefixed URLs plus the bare messenger domains sellers
// actually paste.
const LINK_PATTERN: &str = r"(?i)(?:https?://|www\.|wa\.me/|t\.me/)\S+";

impl ContentFilter {
    /// Creates a filter with the built-in phone, email, and link
    /// detectors and no banned terms.
    #[must_use]
    pub fn new() -> Self {
        Self {
            detectors: vec![
                built_in(MatchKind::PhoneNumber, PHONE_PATTERN),
                built_in(MatchKind::EmailAddress, EMAIL_PATTERN),
                built_in(MatchKind::ExternalLink, LINK_PATTERN),
            ],
        }
    }

    /// Adds banned terms, matched case-insensitively on word
    /// boundaries. Terms are escaped, so `c.o.d` matches literally.
    /// Empty terms are skipped.
    #[must_use]
    pub fn with_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut escaped: Vec<String> = terms
            .into_iter()
            .filter(|t| !t.as_ref().trim().is_empty())
            .map(|t| regex::escape(t.as_ref().trim()))
            .collect();
        if escaped.is_empty() {
            return self;
        }
        // Longest first, so "advance fee" wins over "advance" at the
        // same position.
        escaped.sort_by_key(|t| std::cmp::Reverse(t.len()));
        let alternation = format!(r"(?i)\b(?:{})\b", escaped.join("|"));
        self.detectors.push(built_in(MatchKind::BannedTerm, &alternation));
        self
    }

    /// Adds a custom detector from a regex pattern. Its matches are
    /// reported as [`MatchKind::BannedTerm`].
    pub fn add_pattern(&mut self, pattern: &str) -> ModerationResult<()> {
        let compiled = Regex::new(pattern)?;
        self.detectors.push(Detector {
            kind: MatchKind::BannedTerm,
            pattern: compiled,
        });
        Ok(())
    }

    /// Scans `text` and reports every flagged span, ordered by start
    /// offset.
    #[must_use]
    pub fn scan(&self, text: &str) -> Verdict {
        let mut matches = Vec::new();
        for detector in &self.detectors {
            for found in detector.pattern.find_iter(text) {
                matches.push(FilterMatch {
                    kind: detector.kind,
                    text: found.as_str().to_owned(),
                    start: found.start(),
                    end: found.end(),
                });
            }
        }
        if matches.is_empty() {
            return Verdict::Clean;
        }
        matches.sort_by_key(|m| (m.start, m.end));
        debug!(spans = matches.len(), "content flagged");
        Verdict::Flagged(matches)
    }

    /// Replaces every flagged span with `*` of equal character
    /// length. Clean text comes back unchanged; overlapping spans are
    /// masked once.
    #[must_use]
    pub fn mask(&self, text: &str) -> String {
        let Verdict::Flagged(matches) = self.scan(text) else {
            return text.to_owned();
        };
        let mut masked = String::with_capacity(text.len());
        let mut cursor = 0;
        for m in &matches {
            if m.end <= cursor {
                continue;
            }
            let start = m.start.max(cursor);
            masked.push_str(&text[cursor..start]);
            let stars = text[start..m.end].chars().count();
            masked.extend(std::iter::repeat_n('*', stars));
            cursor = m.end;
        }
        masked.push_str(&text[cursor..]);
        masked
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn built_in(kind: MatchKind, pattern: &str) -> Detector {
    Detector {
        kind,
        pattern: Regex::new(pattern).expect("built-in pattern compiles"),
    }
}
