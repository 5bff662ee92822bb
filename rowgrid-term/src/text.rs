//! Cell text measurement and fitting.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal cells.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Truncate a string to a display width, appending an ellipsis when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push('…');
    result
}

/// Fit a string to exactly `width` cells, truncating or right-padding.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let fitted = truncate_to_width(s, width);
    let pad = width.saturating_sub(display_width(&fitted));
    let mut result = fitted;
    result.extend(std::iter::repeat_n(' ', pad));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK glyph is two cells wide.
        assert_eq!(truncate_to_width("你好世界", 5), "你好…");
    }

    #[test]
    fn test_pad_fills_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abc…");
    }
}
