//! ATX heading line matcher

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // One to six hashes, mandatory whitespace, then text starting with a non-space.
    // Leading indentation is tolerated, so four-space indents still count as headings.
    static ref HEADER_RE: Regex = Regex::new(r"^\s*(#{1,6})\s+(\S.*)$").unwrap();
}

/// A line recognized as an ATX heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// Number of leading `#` characters (1-6)
    pub level: u8,
    
    /// Raw heading text, decoration and trailing whitespace intact
    pub raw_text: &'a str,
}

/// Match a single normalized line against the ATX heading pattern
pub fn match_header(line: &str) -> Option<HeaderMatch<'_>> {
    let caps = HEADER_RE.captures(line)?;
    let hashes = caps.get(1)?;
    let text = caps.get(2)?;
    
    Some(HeaderMatch {
        level: hashes.as_str().len() as u8,
        raw_text: text.as_str(),
    })
}
