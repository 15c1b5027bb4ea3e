use unicode_width::UnicodeWidthStr;

/// Number of terminal columns `text` occupies in a monospace grid.
///
/// East-Asian wide characters and emoji count as two columns, combining
/// marks as zero. Control characters are dropped before measuring so they
/// contribute nothing.
pub fn display_width(text: &str) -> usize {
    if text.chars().any(char::is_control) {
        let visible: String = text.chars().filter(|c| !c.is_control()).collect();
        return UnicodeWidthStr::width(visible.as_str());
    }

    UnicodeWidthStr::width(text)
}

/// Like [`display_width`] but for raw bytes of unknown encoding.
///
/// Input that is not valid UTF-8 cannot be classified, so it falls back to
/// one column per (lossily decoded) character.
pub fn display_width_bytes(bytes: &[u8]) -> usize {
    match std::str::from_utf8(bytes) {
        Ok(text) => display_width(text),
        Err(_) => String::from_utf8_lossy(bytes).chars().count(),
    }
}

/// Left-align `text` in a field of `width` columns.
pub fn pad_right(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{text}{}", " ".repeat(fill))
}

/// Right-align `text` in a field of `width` columns.
pub fn pad_left(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{}{text}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_has_no_width() {
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn ascii_counts_one_column_per_char() {
        assert_eq!(display_width("Clear"), 5);
        assert_eq!(display_width("2024-06-01"), 10);
    }

    #[test]
    fn icon_contributes_positive_width() {
        assert!(display_width("☀️ Clear") > display_width("Clear"));
        assert!(display_width("⛅") >= 1);
    }

    #[test]
    fn wide_characters_take_two_columns() {
        assert_eq!(display_width("⛅"), 2);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn combining_marks_are_zero_width() {
        assert_eq!(display_width("e\u{301}"), 1);
    }

    #[test]
    fn control_characters_are_zero_width() {
        assert_eq!(display_width("a\u{7}b"), 2);
        assert_eq!(display_width("\t\n"), 0);
    }

    #[test]
    fn invalid_utf8_falls_back_to_char_count() {
        assert_eq!(display_width_bytes(b"abc"), 3);
        assert_eq!(display_width_bytes(&[0x61, 0xff, 0x62]), 3);
    }

    #[test]
    fn padding_uses_display_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("ab", 4), "  ab");
        assert_eq!(display_width(&pad_right("⛅", 6)), 6);
        assert_eq!(pad_left("toolong", 3), "toolong");
    }
}
