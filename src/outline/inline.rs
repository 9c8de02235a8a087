//! Inline markup stripping for heading labels

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BOLD_RE: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ITALIC_RE: Regex = Regex::new(r"\*(.*?)\*").unwrap();
    static ref CODE_RE: Regex = Regex::new(r"`(.*?)`").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap();
    static ref STRAY_RE: Regex = Regex::new(r"[*_~`]").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip bold, italic, code and link decoration from heading text
///
/// Only ASCII markdown punctuation is touched. If nothing readable is left,
/// the trimmed raw text is returned instead.
pub fn clean_header_text(raw: &str) -> String {
    let text = BOLD_RE.replace_all(raw, "$1");
    let text = ITALIC_RE.replace_all(&text, "$1");
    let text = CODE_RE.replace_all(&text, "$1");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = STRAY_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    let cleaned = text.trim();
    
    if cleaned.is_empty() {
        raw.trim().to_string()
    } else {
        cleaned.to_string()
    }
}
