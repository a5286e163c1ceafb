//! In-memory full-text index over post titles and content.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::ports::{SearchError, SearchIndex};

/// Title matches count double a content match.
const TITLE_WEIGHT: f64 = 2.0;

struct Document {
    title_terms: HashMap<String, usize>,
    content_terms: HashMap<String, usize>,
}

/// Term-frequency index with title weighting.
///
/// Ranking: score = sum over query terms of (2 * title tf + content tf),
/// descending; ties break on post id for a stable order.
pub struct InMemorySearchIndex {
    docs: RwLock<HashMap<Uuid, Document>>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn term_frequencies(text: &str) -> HashMap<String, usize> {
    let mut terms = HashMap::new();
    for token in tokenize(text) {
        *terms.entry(token).or_insert(0) += 1;
    }
    terms
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn index(&self, id: Uuid, title: &str, content: &str) -> Result<(), SearchError> {
        let doc = Document {
            title_terms: term_frequencies(title),
            content_terms: term_frequencies(content),
        };
        self.docs.write().await.insert(id, doc);
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), SearchError> {
        self.docs.write().await.remove(&id);
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<Uuid>, SearchError> {
        let query_terms: Vec<String> = tokenize(query).collect();
        if query_terms.is_empty() {
            return Ok(Vec::new());
        }

        let docs = self.docs.read().await;
        let mut scored: Vec<(Uuid, f64)> = docs
            .iter()
            .filter_map(|(id, doc)| {
                let mut score = 0.0;
                for term in &query_terms {
                    score += TITLE_WEIGHT * doc.title_terms.get(term).copied().unwrap_or(0) as f64;
                    score += doc.content_terms.get(term).copied().unwrap_or(0) as f64;
                }
                (score > 0.0).then_some((*id, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(scored.into_iter().map(|(id, _)| id).collect())
    }
}
