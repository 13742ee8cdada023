//! Text fitting helpers

use unicode_width::UnicodeWidthStr;

/// Truncation glyph appended by [`ellipsize`]
pub const ELLIPSIS: char = '⋯';

/// Fit `text` into `max_width` cells, replacing the overflow with a single ellipsis.
///
/// Text that already fits is returned unchanged. When `max_width <= 1` and the text
/// does not fit, the result is just the ellipsis.
pub fn ellipsize(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return ELLIPSIS.to_string();
    }

    let budget = max_width - 1;
    let mut result = String::new();
    for c in text.chars() {
        result.push(c);
        // measured on the whole prefix, combining sequences can change the width
        if result.width() > budget {
            result.pop();
            break;
        }
    }
    result.push(ELLIPSIS);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("hello", 10), "hello");
        assert_eq!(ellipsize("hello", 5), "hello");
        assert_eq!(ellipsize("hello world", 8), "hello w⋯");
        assert_eq!(ellipsize("hello", 1), "⋯");
        assert_eq!(ellipsize("", 0), "");
    }

    #[test]
    fn test_ellipsize_wide_chars() {
        // each CJK char is two cells
        assert_eq!(ellipsize("日本語テキスト", 6), "日本⋯");
    }

    proptest! {
        #[test]
        fn ellipsized_text_fits(text in "\\PC{0,40}", max in 1usize..50) {
            let out = ellipsize(&text, max);
            prop_assert!(out.width() <= max);
            if text.width() <= max {
                prop_assert_eq!(out, text);
            }
        }
    }
}
