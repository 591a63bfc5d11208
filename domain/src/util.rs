//! Shared utility functions.

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Used for log previews of user input and backend replies.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Normalize raw user input the way the chat form does before submitting.
///
/// Returns `None` when nothing but whitespace was typed.
pub fn normalize_input(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_input() {
        assert_eq!(truncate_str("PAN", 10), "PAN");
    }

    #[test]
    fn truncate_cuts_ascii() {
        assert_eq!(truncate_str("my PAN is ABCDE1234F", 9), "my PAN is");
    }

    #[test]
    fn truncate_backs_off_multibyte_boundary() {
        // "नम" is two 3-byte characters
        let s = "नम";
        assert_eq!(truncate_str(s, 4), "न");
    }

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize_input("  hello \n"), Some("hello"));
    }

    #[test]
    fn normalize_rejects_blank_input() {
        assert_eq!(normalize_input(""), None);
        assert_eq!(normalize_input(" \t\n"), None);
    }
}
