//! Regex utilities for archgen
//! Extracted to a separate crate for compilation optimization

use once_cell::sync::Lazy;
use regex::Regex;

/// Markdown code fence detection
pub mod fence {
    use super::*;
    use regex::Match;

    /// Literal fence marker
    pub const MARKER: &str = "```";

    /// A line that opens a fenced block, with an optional language tag
    pub static OPENING_LINE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?m)^[ \t]*```[A-Za-z0-9_+.\-]*[ \t]*\r?$")
            .expect("Invalid regex pattern")
    });

    /// A bare fence line, which can only close a block
    pub static CLOSING_LINE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?m)^[ \t]*```[ \t]*\r?$")
            .expect("Invalid regex pattern")
    });

    /// Language tag glued to an opening marker (```json{...)
    pub static INLINE_TAG: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\A(?:json|JSON)")
            .expect("Invalid regex pattern")
    });

    /// Whether the text contains a fence marker anywhere
    pub fn has_marker(text: &str) -> bool {
        text.contains(MARKER)
    }

    /// First line that can open a fenced block
    pub fn opening_line(text: &str) -> Option<Match<'_>> {
        OPENING_LINE.find(text)
    }

    /// Last bare fence line that starts at or after `from`
    pub fn last_closing_line(text: &str, from: usize) -> Option<Match<'_>> {
        CLOSING_LINE
            .find_iter(text)
            .filter(|m| m.start() >= from)
            .last()
    }

    /// Length of a language tag directly following an opening marker
    pub fn inline_tag_len(rest: &str) -> usize {
        INLINE_TAG.find(rest).map(|m| m.end()).unwrap_or(0)
    }
}
