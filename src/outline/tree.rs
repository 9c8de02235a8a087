//! Heading tree - data model, hierarchy builder, and the parse entry points

use serde::{Deserialize, Serialize};

use super::header::match_header;
use super::inline::clean_header_text;
use super::normalize::normalize_line_endings;

/// A heading in the outline forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingNode {
    /// Stable identifier, `heading-<line>`
    pub id: String,
    
    /// Heading label with inline decoration stripped
    pub text: String,
    
    /// Heading level (1-6)
    pub level: u8,
    
    /// Line number (1-indexed)
    pub line: usize,
    
    /// Nested headings, in document order
    #[serde(default)]
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    /// Create a leaf node for a heading found on `line`; the level is clamped to 1-6
    pub fn new(level: u8, text: impl Into<String>, line: usize) -> Self {
        HeadingNode {
            id: heading_id(line),
            text: text.into(),
            level: level.clamp(1, 6),
            line,
            children: Vec::new(),
        }
    }
    
    /// Project this node without its children
    pub fn to_entry(&self) -> FlatHeadingEntry {
        FlatHeadingEntry {
            id: self.id.clone(),
            text: self.text.clone(),
            level: self.level,
            line: self.line,
        }
    }
}

/// A heading without its children, as used for search and keyboard traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatHeadingEntry {
    pub id: String,
    pub text: String,
    pub level: u8,
    pub line: usize,
}

/// Identifier for the heading on a given line
pub fn heading_id(line: usize) -> String {
    format!("heading-{}", line)
}

/// Assemble a forest from headings given in document order
///
/// Open ancestors are kept on a stack. A node is attached to its parent
/// (or to the roots) when it is popped, which keeps children in document order.
pub fn build_hierarchy<I>(headings: I) -> Vec<HeadingNode>
where
    I: IntoIterator<Item = HeadingNode>,
{
    let mut roots: Vec<HeadingNode> = Vec::new();
    let mut stack: Vec<HeadingNode> = Vec::new();
    
    for heading in headings {
        while stack.last().is_some_and(|top| top.level >= heading.level) {
            close_top(&mut stack, &mut roots);
        }
        stack.push(heading);
    }
    
    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }
    
    roots
}

/// Pop the top of the stack and attach it to whatever is now below it
fn close_top(stack: &mut Vec<HeadingNode>, roots: &mut Vec<HeadingNode>) {
    if let Some(node) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

/// Parse markdown text into an outline forest
pub fn parse(content: &str) -> Vec<HeadingNode> {
    if content.is_empty() {
        return Vec::new();
    }
    
    let normalized = normalize_line_endings(content);
    
    let headings = normalized
        .split('\n')
        .enumerate()
        .filter_map(|(idx, line)| {
            let header = match_header(line)?;
            let text = clean_header_text(header.raw_text);
            if text.is_empty() {
                return None;
            }
            Some(HeadingNode::new(header.level, text, idx + 1))
        });
    
    let forest = build_hierarchy(headings);
    tracing::debug!(roots = forest.len(), "Parsed outline");
    
    forest
}

/// Parse loosely typed input; anything other than a JSON string yields an empty forest
pub fn parse_value(value: &serde_json::Value) -> Vec<HeadingNode> {
    match value {
        serde_json::Value::String(content) => parse(content),
        _ => Vec::new(),
    }
}
