//! Line-ending normalization

use std::borrow::Cow;

/// Replace every `\r\n` and lone `\r` with `\n`
///
/// Text that is already LF-only is returned borrowed.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_mixed_line_endings() {
        let normalized = normalize_line_endings("one\r\ntwo\rthree\nfour");
        assert_eq!(normalized, "one\ntwo\nthree\nfour");
    }
    
    #[test]
    fn test_lf_only_is_borrowed() {
        let normalized = normalize_line_endings("# A\n## B\n");
        assert!(matches!(normalized, Cow::Borrowed(_)));
    }
    
    #[test]
    fn test_crlf_is_not_doubled() {
        assert_eq!(normalize_line_endings("a\r\n\r\nb"), "a\n\nb");
    }
}
