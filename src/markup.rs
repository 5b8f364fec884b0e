// 🎨 Markup Utility - inline style tokens and visible width
//
// Report lines carry inline style tokens for the downstream renderer:
//   %%STYLE_START:price%%100 Scales%%STYLE_END%%
// The tokens are written to the output untouched; they only have to be
// ignored when measuring how wide a line looks on screen.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

pub const STYLE_START_PREFIX: &str = "%%STYLE_START:";
pub const STYLE_END: &str = "%%STYLE_END%%";

static STYLE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%%STYLE_START:[A-Za-z0-9_-]+%%|%%STYLE_END%%").expect("valid style token regex")
});

/// Remove every well-formed style token, leaving all other characters alone.
///
/// Malformed tokens (e.g. `%%STYLE_START:%%`, a start without its closing
/// `%%`) stay in the text as literal characters. Removal runs to a fixed
/// point so the function is idempotent even when removing one token glues
/// the surrounding text into a new one.
pub fn strip_markup(text: &str) -> Cow<'_, str> {
    let mut current: Cow<'_, str> = Cow::Borrowed(text);

    loop {
        let next = match STYLE_TOKEN.replace_all(&current, "") {
            Cow::Borrowed(_) => None,
            Cow::Owned(stripped) => Some(stripped),
        };
        match next {
            Some(stripped) => current = Cow::Owned(stripped),
            None => return current,
        }
    }
}

/// Display width of `text` once style tokens are removed.
pub fn visible_width(text: &str) -> usize {
    strip_markup(text).width()
}

/// Wrap `text` in a start/end token pair.
pub fn styled(token: &str, text: &str) -> String {
    format!("{}{}%%{}{}", STYLE_START_PREFIX, token, text, STYLE_END)
}

/// Right-pad `text` with spaces until its visible width reaches `width`.
///
/// The original (tokenized) text is kept; only the pad length is computed
/// from the stripped form. Text already at or past `width` is returned as-is.
pub fn pad_visible(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(text));
    let mut padded = String::with_capacity(text.len() + pad);
    padded.push_str(text);
    padded.extend(std::iter::repeat(' ').take(pad));
    padded
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strip_removes_token_pair() {
        let line = "Sword %%STYLE_START:price%%100 Scales%%STYLE_END%%";
        assert_eq!(strip_markup(line), "Sword 100 Scales");
    }

    #[test]
    fn test_strip_plain_text_is_borrowed() {
        let stripped = strip_markup("Strength: 75/101");
        assert!(matches!(stripped, Cow::Borrowed(_)));
        assert_eq!(stripped, "Strength: 75/101");
    }

    #[test]
    fn test_strip_leaves_malformed_tokens() {
        // No token name, and a start that never closes
        assert_eq!(strip_markup("%%STYLE_START:%%x"), "%%STYLE_START:%%x");
        assert_eq!(strip_markup("%%STYLE_START:price x"), "%%STYLE_START:price x");
    }

    #[test]
    fn test_strip_unmatched_end_token() {
        assert_eq!(strip_markup("abc%%STYLE_END%%"), "abc");
    }

    #[test]
    fn test_strip_nested_glued_tokens() {
        // Removing the inner end token forms a new end token
        let glued = "a%%STYLE_%%STYLE_END%%END%%b";
        assert_eq!(strip_markup(glued), "ab");
    }

    #[test]
    fn test_visible_width_ignores_tokens() {
        let line = styled("title", "Stats");
        assert_eq!(visible_width(&line), 5);
    }

    #[test]
    fn test_pad_visible_uses_stripped_width() {
        let cell = styled("price", "50");
        let padded = pad_visible(&cell, 6);
        assert!(padded.starts_with(&cell));
        assert_eq!(visible_width(&padded), 6);
    }

    #[test]
    fn test_pad_visible_never_truncates() {
        assert_eq!(pad_visible("abcdef", 3), "abcdef");
    }

    fn markup_text() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                Just("%%STYLE_START:price%%".to_string()),
                Just("%%STYLE_END%%".to_string()),
                Just("%%STYLE_".to_string()),
                Just("END%%".to_string()),
                Just("%%".to_string()),
                "[a-z :/0-9]{0,6}",
            ],
            0..12,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn prop_strip_is_idempotent(text in markup_text()) {
            let once = strip_markup(&text).into_owned();
            let twice = strip_markup(&once).into_owned();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_strip_never_grows(text in markup_text()) {
            prop_assert!(strip_markup(&text).len() <= text.len());
        }
    }
}
