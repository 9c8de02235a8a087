//! Outline navigator - selection, folding, and cursor targets over a parsed document

use std::collections::{BTreeSet, HashSet};

use crate::error::Result;
use crate::outline::{
    flatten, generate_toc_with, normalize_line_endings, parse, position_from_line, search, statistics, FlatHeadingEntry,
    HeadingNode, OutlineStatistics, TocOptions,
};

use super::store::ExpansionStore;

/// Stateful view over one document's outline
///
/// The forest is always recomputed from scratch on `refresh`. Fold state lives in
/// the injected store, keyed by document id.
pub struct OutlineNavigator<S: ExpansionStore> {
    document_id: String,
    store: S,
    content: String,
    forest: Vec<HeadingNode>,
    entries: Vec<FlatHeadingEntry>,
    collapsed: BTreeSet<String>,
    selected: Option<String>,
}

impl<S: ExpansionStore> OutlineNavigator<S> {
    /// Create a navigator for `document_id`, loading its fold state
    pub fn new(document_id: impl Into<String>, store: S) -> Result<Self> {
        let document_id = document_id.into();
        let collapsed = store.load(&document_id)?;
        
        Ok(OutlineNavigator {
            document_id,
            store,
            content: String::new(),
            forest: Vec::new(),
            entries: Vec::new(),
            collapsed,
            selected: None,
        })
    }
    
    /// Recompute the outline from `content`
    ///
    /// Line endings are normalized first, so `activate` offsets refer to the LF-only text.
    pub fn refresh(&mut self, content: &str) {
        self.content = normalize_line_endings(content).into_owned();
        self.forest = parse(&self.content);
        self.entries = flatten(&self.forest);
        
        if let Some(id) = &self.selected {
            if !self.entries.iter().any(|e| &e.id == id) {
                self.selected = None;
            }
        }
        self.reveal_selection();
        
        tracing::debug!(
            document = %self.document_id,
            headings = self.entries.len(),
            "Refreshed outline"
        );
    }
    
    pub fn document_id(&self) -> &str {
        &self.document_id
    }
    
    pub fn forest(&self) -> &[HeadingNode] {
        &self.forest
    }
    
    /// Every heading in document order
    pub fn entries(&self) -> &[FlatHeadingEntry] {
        &self.entries
    }
    
    /// Headings not hidden under a collapsed ancestor, in document order
    pub fn visible_entries(&self) -> Vec<FlatHeadingEntry> {
        let mut visible = Vec::new();
        self.collect_visible(&self.forest, &mut visible);
        visible
    }
    
    fn collect_visible(&self, nodes: &[HeadingNode], visible: &mut Vec<FlatHeadingEntry>) {
        for node in nodes {
            visible.push(node.to_entry());
            if !self.collapsed.contains(&node.id) {
                self.collect_visible(&node.children, visible);
            }
        }
    }
    
    /// Select a heading by id; unknown ids leave the selection unchanged
    pub fn select(&mut self, id: &str) -> bool {
        if !self.entries.iter().any(|e| e.id == id) {
            return false;
        }
        
        self.selected = Some(id.to_string());
        tracing::debug!(document = %self.document_id, selected = id, "Selected heading");
        true
    }
    
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
    
    pub fn selected(&self) -> Option<&FlatHeadingEntry> {
        let id = self.selected.as_ref()?;
        self.entries.iter().find(|e| &e.id == id)
    }
    
    /// Move the selection down one visible heading; stops at the last
    pub fn select_next(&mut self) -> Option<&FlatHeadingEntry> {
        let visible = self.visible_entries();
        let next = match self.selected_index(&visible) {
            Some(idx) => visible.get(idx + 1).or_else(|| visible.get(idx)),
            None => visible.first(),
        };
        self.selected = next.map(|e| e.id.clone());
        self.selected()
    }
    
    /// Move the selection up one visible heading; stops at the first
    pub fn select_previous(&mut self) -> Option<&FlatHeadingEntry> {
        let visible = self.visible_entries();
        let previous = match self.selected_index(&visible) {
            Some(idx) => visible.get(idx.saturating_sub(1)),
            None => visible.last(),
        };
        self.selected = previous.map(|e| e.id.clone());
        self.selected()
    }
    
    fn selected_index(&self, visible: &[FlatHeadingEntry]) -> Option<usize> {
        let id = self.selected.as_ref()?;
        visible.iter().position(|e| &e.id == id)
    }
    
    /// Headings are expanded unless collapsed in the store
    pub fn is_expanded(&self, id: &str) -> bool {
        !self.collapsed.contains(id)
    }
    
    /// Flip a heading's fold state and persist it; returns the new expanded state
    ///
    /// Ids not in the current outline are left untouched.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        if !self.entries.iter().any(|e| e.id == id) {
            return Ok(self.is_expanded(id));
        }
        
        let expanded = if self.collapsed.remove(id) {
            true
        } else {
            self.collapsed.insert(id.to_string());
            false
        };
        
        self.store.save(&self.document_id, &self.collapsed)?;
        self.reveal_selection();
        Ok(expanded)
    }
    
    pub fn expand_all(&mut self) -> Result<()> {
        self.collapsed.clear();
        self.store.save(&self.document_id, &self.collapsed)
    }
    
    /// Collapse every heading that has children
    pub fn collapse_all(&mut self) -> Result<()> {
        let mut parents = BTreeSet::new();
        collect_parents(&self.forest, &mut parents);
        self.collapsed = parents;
        self.store.save(&self.document_id, &self.collapsed)?;
        self.reveal_selection();
        Ok(())
    }
    
    /// Move a selection hidden by a fold up to its outermost collapsed ancestor
    fn reveal_selection(&mut self) {
        let Some(id) = self.selected.clone() else {
            return;
        };
        
        let mut path = Vec::new();
        if !path_to(&self.forest, &id, &mut path) {
            return;
        }
        
        let hidden_by = path[..path.len() - 1]
            .iter()
            .find(|ancestor| self.collapsed.contains(*ancestor));
        if let Some(ancestor) = hidden_by {
            self.selected = Some(ancestor.clone());
        }
    }
    
    /// Cursor offset for the selected heading
    pub fn activate(&self) -> Option<usize> {
        let entry = self.selected()?;
        Some(position_from_line(&self.content, entry.line as i64))
    }
    
    /// Headings whose text matches `query`; an absent query matches nothing
    pub fn filter(&self, query: Option<&str>) -> Vec<FlatHeadingEntry> {
        search(&self.forest, query.unwrap_or_default())
    }
    
    pub fn statistics(&self) -> OutlineStatistics {
        statistics(&self.forest)
    }
    
    pub fn toc(&self, options: &TocOptions) -> String {
        generate_toc_with(&self.forest, options)
    }
    
    /// Ids of headings that currently exist and are collapsed
    pub fn collapsed_ids(&self) -> HashSet<&str> {
        self.entries
            .iter()
            .filter(|e| self.collapsed.contains(&e.id))
            .map(|e| e.id.as_str())
            .collect()
    }
}

fn collect_parents(nodes: &[HeadingNode], parents: &mut BTreeSet<String>) {
    for node in nodes {
        if !node.children.is_empty() {
            parents.insert(node.id.clone());
            collect_parents(&node.children, parents);
        }
    }
}

/// Ids from a root down to `id`, inclusive
fn path_to(nodes: &[HeadingNode], id: &str, path: &mut Vec<String>) -> bool {
    for node in nodes {
        path.push(node.id.clone());
        if node.id == id || path_to(&node.children, id, path) {
            return true;
        }
        path.pop();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::MemoryStore;
    use crate::outline::line_from_position;
    
    const DOC: &str = "# Chapter 1\nintro\n## Section 1.1\n### Subsection 1.1.1\n## Section 1.2\n# Chapter 2\n";
    
    fn navigator() -> OutlineNavigator<MemoryStore> {
        let mut nav = OutlineNavigator::new("doc.md", MemoryStore::new()).unwrap();
        nav.refresh(DOC);
        nav
    }
    
    fn visible_ids<S: ExpansionStore>(nav: &OutlineNavigator<S>) -> Vec<String> {
        nav.visible_entries().into_iter().map(|e| e.id).collect()
    }
    
    #[test]
    fn test_refresh_builds_outline() {
        let nav = navigator();
        assert_eq!(nav.forest().len(), 2);
        assert_eq!(nav.entries().len(), 5);
        assert_eq!(nav.visible_entries().len(), 5);
        assert!(nav.selected().is_none());
    }
    
    #[test]
    fn test_select_and_activate() {
        let mut nav = navigator();
        assert!(nav.select("heading-4"));
        assert_eq!(nav.selected().unwrap().text, "Subsection 1.1.1");
        
        let position = nav.activate().unwrap();
        assert_eq!(position, 33);
        assert_eq!(line_from_position(DOC, position as i64), 4);
    }
    
    #[test]
    fn test_select_unknown_keeps_selection() {
        let mut nav = navigator();
        nav.select("heading-1");
        assert!(!nav.select("heading-2"));
        assert_eq!(nav.selected().unwrap().id, "heading-1");
    }
    
    #[test]
    fn test_keyboard_traversal_stops_at_ends() {
        let mut nav = navigator();
        assert_eq!(nav.select_next().unwrap().id, "heading-1");
        assert_eq!(nav.select_previous().unwrap().id, "heading-1");
        
        for _ in 0..10 {
            nav.select_next();
        }
        assert_eq!(nav.selected().unwrap().id, "heading-6");
        
        nav.clear_selection();
        assert_eq!(nav.select_previous().unwrap().id, "heading-6");
    }
    
    #[test]
    fn test_collapse_hides_descendants() {
        let mut nav = navigator();
        assert!(!nav.toggle("heading-1").unwrap());
        assert!(!nav.is_expanded("heading-1"));
        assert_eq!(visible_ids(&nav), vec!["heading-1", "heading-6"]);
        
        nav.select("heading-1");
        assert_eq!(nav.select_next().unwrap().id, "heading-6");
        
        assert!(nav.toggle("heading-1").unwrap());
        assert_eq!(nav.visible_entries().len(), 5);
    }
    
    #[test]
    fn test_collapse_moves_hidden_selection() {
        let mut nav = navigator();
        nav.select("heading-4");
        nav.toggle("heading-1").unwrap();
        assert_eq!(nav.selected().unwrap().id, "heading-1");
    }
    
    #[test]
    fn test_collapse_all_and_expand_all() {
        let mut nav = navigator();
        nav.collapse_all().unwrap();
        assert_eq!(visible_ids(&nav), vec!["heading-1", "heading-6"]);
        assert_eq!(nav.collapsed_ids().len(), 2);
        
        nav.expand_all().unwrap();
        assert_eq!(nav.visible_entries().len(), 5);
    }
    
    #[test]
    fn test_fold_state_persists_through_store() {
        let mut nav = navigator();
        nav.toggle("heading-3").unwrap();
        let OutlineNavigator { store, .. } = nav;
        
        let mut reopened = OutlineNavigator::new("doc.md", store).unwrap();
        reopened.refresh(DOC);
        assert!(!reopened.is_expanded("heading-3"));
        assert_eq!(reopened.visible_entries().len(), 4);
        
        let other = OutlineNavigator::new("other.md", reopened.store).unwrap();
        assert!(other.is_expanded("heading-3"));
    }
    
    #[test]
    fn test_refresh_drops_stale_selection() {
        let mut nav = navigator();
        nav.select("heading-5");
        
        nav.refresh("# Chapter 1\n## Section 1.1");
        assert!(nav.selected().is_none());
        
        nav.select("heading-1");
        nav.refresh("# Renamed\nbody");
        assert_eq!(nav.selected().unwrap().text, "Renamed");
    }
    
    #[test]
    fn test_filter() {
        let nav = navigator();
        assert_eq!(nav.filter(Some("chapter")).len(), 2);
        assert!(nav.filter(Some("")).is_empty());
        assert!(nav.filter(None).is_empty());
    }
    
    #[test]
    fn test_passthroughs() {
        let nav = navigator();
        assert_eq!(nav.statistics().total, 5);
        assert!(nav.toc(&TocOptions::default()).starts_with("- [Chapter 1](#heading-1)"));
    }
    
    #[test]
    fn test_activate_with_cr_line_endings() {
        let content = "# A\r## B\rtext";
        let mut nav = OutlineNavigator::new("cr.md", MemoryStore::new()).unwrap();
        nav.refresh(content);
        
        assert!(nav.select("heading-2"));
        let position = nav.activate().unwrap();
        assert_eq!(position, 4);
        
        let normalized = normalize_line_endings(content);
        assert_eq!(line_from_position(&normalized, position as i64), 2);
    }
    
    #[test]
    fn test_activate_with_crlf_line_endings() {
        let mut nav = OutlineNavigator::new("crlf.md", MemoryStore::new()).unwrap();
        nav.refresh("# A\r\nbody\r\n## B\r\n");
        
        nav.select("heading-3");
        assert_eq!(nav.activate(), Some(9));
    }
    
    #[test]
    fn test_toggle_unknown_id_is_ignored() {
        let mut nav = navigator();
        assert!(nav.toggle("heading-99").unwrap());
        assert!(nav.collapsed_ids().is_empty());
        assert!(nav.store.load("doc.md").unwrap().is_empty());
        assert_eq!(nav.visible_entries().len(), 5);
    }
}
