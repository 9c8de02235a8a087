//! Outline utilities - flattening, search, statistics, and table of contents

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::tree::{heading_id, FlatHeadingEntry, HeadingNode};

/// Heading counts for an outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineStatistics {
    /// Total number of headings
    pub total: usize,
    
    /// Count per level; levels 1 through 6 are always present
    pub by_level: BTreeMap<u8, usize>,
}

/// How table-of-contents links point at their headings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorStyle {
    /// `#heading-<line>`
    #[default]
    Line,
    /// `#<slugified-text>`, with `-2`, `-3`... for repeats
    Slug,
}

/// Table-of-contents rendering options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocOptions {
    /// Spaces per depth level
    pub indent: usize,
    
    /// Deepest heading level to include
    pub max_level: Option<u8>,
    
    /// Link target style
    pub anchor: AnchorStyle,
}

impl Default for TocOptions {
    fn default() -> Self {
        TocOptions {
            indent: 2,
            max_level: None,
            anchor: AnchorStyle::Line,
        }
    }
}

/// Pre-order projection of the forest
pub fn flatten(forest: &[HeadingNode]) -> Vec<FlatHeadingEntry> {
    let mut entries = Vec::new();
    flatten_into(forest, &mut entries);
    entries
}

fn flatten_into(nodes: &[HeadingNode], entries: &mut Vec<FlatHeadingEntry>) {
    for node in nodes {
        entries.push(node.to_entry());
        flatten_into(&node.children, entries);
    }
}

/// Entries whose text contains `query`, ignoring case
///
/// An empty query matches nothing.
pub fn search(forest: &[HeadingNode], query: &str) -> Vec<FlatHeadingEntry> {
    if query.is_empty() {
        return Vec::new();
    }
    
    let needle = query.to_lowercase();
    flatten(forest)
        .into_iter()
        .filter(|entry| entry.text.to_lowercase().contains(&needle))
        .collect()
}

/// Count headings overall and per level
///
/// Levels outside 1-6 count toward the total only.
pub fn statistics(forest: &[HeadingNode]) -> OutlineStatistics {
    let mut by_level: BTreeMap<u8, usize> = (1..=6).map(|level| (level, 0)).collect();
    let mut total = 0;
    
    for entry in flatten(forest) {
        total += 1;
        if let Some(count) = by_level.get_mut(&entry.level) {
            *count += 1;
        }
    }
    
    OutlineStatistics { total, by_level }
}

/// Render the forest as a nested markdown list of `#heading-<line>` links
pub fn generate_toc(forest: &[HeadingNode]) -> String {
    generate_toc_with(forest, &TocOptions::default())
}

/// Render the forest as a nested markdown list using `options`
pub fn generate_toc_with(forest: &[HeadingNode], options: &TocOptions) -> String {
    let mut lines = Vec::new();
    let mut used_slugs: HashSet<String> = HashSet::new();
    render_toc(forest, 0, options, &mut used_slugs, &mut lines);
    lines.join("\n")
}

fn render_toc(
    nodes: &[HeadingNode],
    depth: usize,
    options: &TocOptions,
    used_slugs: &mut HashSet<String>,
    lines: &mut Vec<String>,
) {
    for node in nodes {
        if options.max_level.is_some_and(|max| node.level > max) {
            continue;
        }
        
        let anchor = match options.anchor {
            AnchorStyle::Line => heading_id(node.line),
            AnchorStyle::Slug => unique_slug(node, used_slugs),
        };
        
        lines.push(format!(
            "{}- [{}](#{})",
            " ".repeat(depth * options.indent),
            node.text,
            anchor
        ));
        
        render_toc(&node.children, depth + 1, options, used_slugs, lines);
    }
}

/// Slug anchor not yet emitted in this table; repeats get `-2`, `-3`...
fn unique_slug(node: &HeadingNode, used_slugs: &mut HashSet<String>) -> String {
    let base = slug::slugify(&node.text);
    let base = if base.is_empty() { heading_id(node.line) } else { base };
    
    let mut candidate = base.clone();
    let mut suffix = 1;
    while used_slugs.contains(&candidate) {
        suffix += 1;
        candidate = format!("{}-{}", base, suffix);
    }
    
    used_slugs.insert(candidate.clone());
    candidate
}
