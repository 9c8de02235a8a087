//! Conversion between character offsets and 1-indexed line numbers
//!
//! Offsets count Unicode scalar values, not bytes.

/// 1-indexed line containing the character at `position`
///
/// Negative positions clamp to line 1, positions past the end clamp to the last line.
pub fn line_from_position(content: &str, position: i64) -> usize {
    let position = usize::try_from(position).unwrap_or(0);
    
    content
        .chars()
        .take(position)
        .filter(|&c| c == '\n')
        .count()
        + 1
}

/// Character offset of the start of `line_number`
///
/// Lines at or below 1 map to 0; lines past the end map to the end of the document.
pub fn position_from_line(content: &str, line_number: i64) -> usize {
    if line_number <= 1 {
        return 0;
    }
    
    let preceding = (line_number - 1) as usize;
    let mut position = 0;
    
    for (idx, line) in content.split('\n').enumerate() {
        if idx == preceding {
            return position;
        }
        position += line.chars().count() + 1;
    }
    
    content.chars().count()
}
