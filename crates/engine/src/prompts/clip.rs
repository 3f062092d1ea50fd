/// Hard character-count slice.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
/// No ellipsis is appended and word boundaries are ignored.
pub fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(clip("Emilia", 10), "Emilia");
        assert_eq!(clip("Emilia", 6), "Emilia");
        assert_eq!(clip("", 3), "");
    }

    #[test]
    fn cuts_mid_word() {
        assert_eq!(clip("Witch of Envy", 7), "Witch o");
        assert_eq!(clip("anything", 0), "");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(clip("魔女教の大罪司教", 3), "魔女教");
        assert_eq!(clip("◇◇◇ break", 2), "◇◇");
    }
}
