//! Expansion-state stores - remember which headings are collapsed, per document

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Key-value collaborator holding collapsed heading ids, keyed by document id
pub trait ExpansionStore {
    /// Collapsed heading ids for a document; unknown documents have none
    fn load(&self, document_id: &str) -> Result<BTreeSet<String>>;
    
    /// Replace the collapsed ids for a document
    fn save(&mut self, document_id: &str, collapsed: &BTreeSet<String>) -> Result<()>;
}

/// In-process store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    documents: HashMap<String, BTreeSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExpansionStore for MemoryStore {
    fn load(&self, document_id: &str) -> Result<BTreeSet<String>> {
        Ok(self.documents.get(document_id).cloned().unwrap_or_default())
    }
    
    fn save(&mut self, document_id: &str, collapsed: &BTreeSet<String>) -> Result<()> {
        if collapsed.is_empty() {
            self.documents.remove(document_id);
        } else {
            self.documents.insert(document_id.to_string(), collapsed.clone());
        }
        Ok(())
    }
}

/// Store backed by a single JSON file: `{ "<document-id>": ["heading-3", ...] }`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }
    
    pub fn path(&self) -> &Path {
        &self.path
    }
    
    fn read_all(&self) -> Result<BTreeMap<String, BTreeSet<String>>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        
        let contents = std::fs::read_to_string(&self.path).map_err(|source| StoreError::ReadFile {
            path: self.path.clone(),
            source,
        })?;
        
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        
        serde_json::from_str(&contents).map_err(|source| StoreError::ParseJson {
            path: self.path.clone(),
            source,
        })
    }
    
    fn write_all(&self, documents: &BTreeMap<String, BTreeSet<String>>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        
        let json = serde_json::to_string_pretty(documents).map_err(StoreError::SerializeJson)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::WriteFile {
            path: self.path.clone(),
            source,
        })
    }
}

impl ExpansionStore for JsonFileStore {
    fn load(&self, document_id: &str) -> Result<BTreeSet<String>> {
        let mut documents = self.read_all()?;
        let collapsed = documents.remove(document_id).unwrap_or_default();
        tracing::debug!(document = document_id, collapsed = collapsed.len(), "Loaded fold state");
        Ok(collapsed)
    }
    
    fn save(&mut self, document_id: &str, collapsed: &BTreeSet<String>) -> Result<()> {
        let mut documents = self.read_all()?;
        if collapsed.is_empty() {
            documents.remove(document_id);
        } else {
            documents.insert(document_id.to_string(), collapsed.clone());
        }
        
        self.write_all(&documents)?;
        tracing::debug!(
            document = document_id,
            collapsed = collapsed.len(),
            path = %self.path.display(),
            "Saved fold state"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    
    fn ids(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }
    
    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load("doc").unwrap().is_empty());
        
        store.save("doc", &ids(&["heading-1", "heading-4"])).unwrap();
        assert_eq!(store.load("doc").unwrap(), ids(&["heading-1", "heading-4"]));
        assert!(store.load("other").unwrap().is_empty());
        
        store.save("doc", &BTreeSet::new()).unwrap();
        assert!(store.load("doc").unwrap().is_empty());
    }
    
    #[test]
    fn test_json_store_missing_file() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("folds.json"));
        assert!(store.load("doc").unwrap().is_empty());
    }
    
    #[test]
    fn test_json_store_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("folds.json");
        
        let mut store = JsonFileStore::new(&path);
        store.save("a.md", &ids(&["heading-2"])).unwrap();
        store.save("b.md", &ids(&["heading-7", "heading-9"])).unwrap();
        
        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load("a.md").unwrap(), ids(&["heading-2"]));
        assert_eq!(reopened.load("b.md").unwrap(), ids(&["heading-7", "heading-9"]));
    }
    
    #[test]
    fn test_json_store_clearing_removes_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("folds.json");
        
        let mut store = JsonFileStore::new(&path);
        store.save("a.md", &ids(&["heading-2"])).unwrap();
        store.save("a.md", &BTreeSet::new()).unwrap();
        
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("a.md"));
    }
    
    #[test]
    fn test_json_store_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("folds.json");
        std::fs::write(&path, "not json").unwrap();
        
        let store = JsonFileStore::new(&path);
        let err = store.load("a.md").unwrap_err();
        assert!(matches!(err, StoreError::ParseJson { .. }));
    }
}
