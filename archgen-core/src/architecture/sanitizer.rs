//! Removes markdown fencing from model output
//!
//! Providers are told not to fence their JSON and regularly do anyway,
//! sometimes with a sentence before or after the block. `sanitize` peels
//! fences until none are left at the edges and returns the inner text.
//! Text without any fence marker comes back untouched, whitespace included.

use regex_utils::fence;

/// Strip code fences from `raw`
///
/// Idempotent: `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(raw: &str) -> &str {
    let mut current = raw;
    let mut stripped = false;

    while let Some(inner) = strip_fence_once(current) {
        current = inner;
        stripped = true;
    }

    if stripped { current.trim() } else { raw }
}

/// Remove one layer of fencing; `None` when there is nothing to remove
///
/// Every `Some` is strictly shorter than its input.
fn strip_fence_once(text: &str) -> Option<&str> {
    if !fence::has_marker(text) {
        return None;
    }

    // depends only on the trimmed text, so a trimmed fixed point stays one
    let text = text.trim();
    if let Some(rest) = text.strip_prefix(fence::MARKER) {
        return Some(strip_closing(skip_language_tag(rest)).trim());
    }

    if let Some(open) = fence::opening_line(text) {
        // fenced block preceded by prose
        if let Some(close) = fence::last_closing_line(text, open.end()) {
            return Some(text[open.end()..close.start()].trim());
        }
        let after = text[open.end()..].trim();
        if !after.is_empty() {
            return Some(after);
        }
        // a lone fence line at the end only closes what came before it
        return Some(text[..open.start()].trim());
    }

    text.strip_suffix(fence::MARKER).map(str::trim_end)
}

/// Drop the language tag that may follow an opening marker
fn skip_language_tag(rest: &str) -> &str {
    match rest.find('\n') {
        Some(nl) if is_tag_line(&rest[..nl]) => &rest[nl + 1..],
        None if is_tag_line(rest) => "",
        _ => &rest[fence::inline_tag_len(rest)..],
    }
}

fn is_tag_line(line: &str) -> bool {
    line.trim().chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '.' | '-'))
}

/// Drop the closing marker and anything after it
fn strip_closing(body: &str) -> &str {
    let body = body.trim_end();
    if let Some(inner) = body.strip_suffix(fence::MARKER) {
        return inner;
    }
    match fence::last_closing_line(body, 0) {
        Some(close) => &body[..close.start()],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const JSON: &str = "{\n  \"a\": 1\n}";

    #[test]
    fn test_strips_tagged_fence() {
        assert_eq!(sanitize("```json\n{\n  \"a\": 1\n}\n```"), JSON);
        assert_eq!(sanitize("  ```JSON\r\n{\n  \"a\": 1\n}\r\n```  \n"), JSON);
    }

    #[test]
    fn test_strips_bare_fence() {
        assert_eq!(sanitize("```\n{\n  \"a\": 1\n}\n```"), JSON);
    }

    #[test]
    fn test_strips_fence_glued_to_content() {
        assert_eq!(sanitize("```json{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(sanitize("```{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_strips_surrounding_prose() {
        let raw = concat!(
            "Here is the architecture you asked for:\n\n",
            "```json\n{\n  \"a\": 1\n}\n```\n\n",
            "Let me know if you need changes."
        );
        assert_eq!(sanitize(raw), JSON);
    }

    #[test]
    fn test_handles_unterminated_and_dangling_fences() {
        assert_eq!(sanitize("```json\n{\n  \"a\": 1\n}"), JSON);
        assert_eq!(sanitize("{\n  \"a\": 1\n}\n```"), JSON);
        assert_eq!(sanitize("{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_nested_fences_reach_fixed_point() {
        let raw = "```json\n```json\n{\"a\":1}\n```\n```";
        let once = sanitize(raw);
        assert_eq!(once, "{\"a\":1}");
        assert_eq!(sanitize(once), once);
    }

    #[test]
    fn test_fence_free_text_is_untouched() {
        for raw in ["  {\"a\": 1}\n", "plain prose, no json", "", "`inline` and ``double``"] {
            assert_eq!(sanitize(raw), raw);
        }
    }

    #[test]
    fn test_only_fences_yields_empty() {
        assert_eq!(sanitize("```"), "");
        assert_eq!(sanitize("```json\n```"), "");
    }

    fn fragments() -> impl Strategy<Value = String> {
        let piece = prop_oneof![
            Just("```".to_string()),
            Just("```json".to_string()),
            Just("\n".to_string()),
            Just("\r\n".to_string()),
            Just(" ".to_string()),
            Just("{\"a\": [1, 2]}".to_string()),
            Just("Here you go:".to_string()),
            "[a-z`{} ]{0,6}",
        ];
        prop::collection::vec(piece, 0..12).prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn prop_sanitize_is_idempotent(raw in fragments()) {
            let once = sanitize(&raw);
            prop_assert_eq!(sanitize(once), once);
        }

        #[test]
        fn prop_sanitize_is_idempotent_on_any_text(raw in any::<String>()) {
            let once = sanitize(&raw);
            prop_assert_eq!(sanitize(once), once);
        }

        #[test]
        fn prop_no_marker_no_change(raw in "[^`]*") {
            prop_assert_eq!(sanitize(&raw), raw.as_str());
        }
    }
}
