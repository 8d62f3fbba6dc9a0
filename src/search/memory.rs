//! In-process search index.
//!
//! Only published documents are searchable. Drafts are still tracked, so they
//! show up as pending items in [`IndexInfo`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{IndexInfo, ResultItem, ResultSet, SearchBackend, SearchError, SearchIndex, SearchQuery};

pub const MEMORY_BACKEND_ID: &str = "memory";

/// A searchable article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub published: bool,
}

struct Entry {
    doc: Document,
    /// Lower-cased title and body
    haystack: String,
}

impl Entry {
    fn new(doc: Document) -> Self {
        let haystack = format!("{}\n{}", doc.title, doc.body).to_lowercase();
        Self { doc, haystack }
    }

    fn matches(&self, words: &[String]) -> bool {
        self.doc.published && words.iter().all(|w| self.haystack.contains(w.as_str()))
    }
}

/// Thread-safe in-memory index
pub struct MemoryIndex {
    label: String,
    server_label: String,
    entries: RwLock<Vec<Entry>>,
}

impl MemoryIndex {
    /// Create an empty index
    pub fn new(label: impl Into<String>, server_label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            server_label: server_label.into(),
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Add documents, keeping entries ordered by id
    pub fn insert_all(&self, docs: impl IntoIterator<Item = Document>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.extend(docs.into_iter().map(Entry::new));
        entries.sort_by_key(|e| e.doc.id);
    }

    /// Publish every draft and return how many were published
    pub fn publish_all(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let mut published = 0;
        for entry in entries.iter_mut().filter(|e| !e.doc.published) {
            entry.doc.published = true;
            published += 1;
        }
        tracing::info!(published, index = %self.label, "Published draft documents");
        published
    }

    /// Run a query synchronously
    pub fn search(&self, query: &SearchQuery) -> ResultSet {
        let words: Vec<String> = query
            .keys
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        // An empty key string matches nothing
        if words.is_empty() {
            return ResultSet::default();
        }

        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let mut result_count = 0u64;
        let mut items = Vec::with_capacity(query.limit.min(64));

        for entry in entries.iter().filter(|e| e.matches(&words)) {
            let position = result_count as usize;
            if position >= query.offset && items.len() < query.limit {
                items.push(ResultItem {
                    id: entry.doc.id,
                    title: entry.doc.title.clone(),
                });
            }
            result_count += 1;
        }

        ResultSet {
            result_count,
            items,
        }
    }

    /// Snapshot of index metadata
    pub fn index_info(&self) -> IndexInfo {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        IndexInfo {
            label: self.label.clone(),
            server_label: self.server_label.clone(),
            backend_id: MEMORY_BACKEND_ID.to_string(),
            indexed_items: entries.iter().filter(|e| e.doc.published).count() as u64,
            total_items: entries.len() as u64,
        }
    }
}

#[async_trait]
impl SearchIndex for MemoryIndex {
    async fn query(&self, query: &SearchQuery) -> Result<ResultSet, SearchError> {
        Ok(self.search(query))
    }

    async fn info(&self) -> Result<IndexInfo, SearchError> {
        Ok(self.index_info())
    }
}

/// Named collection of in-memory indexes
#[derive(Clone, Default)]
pub struct MemoryBackend {
    indexes: HashMap<String, Arc<MemoryIndex>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an index under a machine name
    pub fn with_index(mut self, name: impl Into<String>, index: Arc<MemoryIndex>) -> Self {
        self.indexes.insert(name.into(), index);
        self
    }

    /// Look up an index without going through the trait object
    pub fn get(&self, name: &str) -> Option<Arc<MemoryIndex>> {
        self.indexes.get(name).cloned()
    }
}

#[async_trait]
impl SearchBackend for MemoryBackend {
    async fn resolve(&self, index: &str) -> Result<Option<Arc<dyn SearchIndex>>, SearchError> {
        Ok(self
            .get(index)
            .map(|idx| idx as Arc<dyn SearchIndex>))
    }
}
