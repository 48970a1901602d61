use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tasklane_application::SearchIndex;
use tasklane_core::AppResult;
use tasklane_domain::{SEARCH_PAGE_SIZE, SearchDocument};

/// In-memory search index keyed by document id.
///
/// Results are returned in id order.
#[derive(Debug, Default)]
pub struct InMemorySearchIndex {
    documents: RwLock<BTreeMap<String, SearchDocument>>,
}

impl InMemorySearchIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of indexed documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Returns whether the index holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn submit(&self, document: &SearchDocument) -> AppResult<()> {
        self.documents
            .write()
            .await
            .insert(document.id().to_owned(), document.clone());
        Ok(())
    }

    async fn query(&self, keyword: &str) -> AppResult<Vec<SearchDocument>> {
        Ok(self
            .documents
            .read()
            .await
            .values()
            .filter(|document| document.matches_keyword(keyword))
            .take(SEARCH_PAGE_SIZE)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use tasklane_domain::DocumentType;

    use super::*;

    #[tokio::test]
    async fn submit_is_an_idempotent_upsert() -> AppResult<()> {
        let index = InMemorySearchIndex::new();
        let first = SearchDocument::new("p1", DocumentType::Project, "Roadmap", "")?;
        let renamed = SearchDocument::new("p1", DocumentType::Project, "Roadmap 2025", "")?;

        index.submit(&first).await?;
        index.submit(&first).await?;
        index.submit(&renamed).await?;

        assert_eq!(index.len().await, 1);
        assert_eq!(index.query("2025").await?, vec![renamed]);
        Ok(())
    }

    #[tokio::test]
    async fn query_matches_description_and_caps_results() -> AppResult<()> {
        let index = InMemorySearchIndex::new();
        for number in 0..12 {
            let document = SearchDocument::new(
                format!("t{number:02}"),
                DocumentType::Task,
                "Chore",
                "Budget review",
            )?;
            index.submit(&document).await?;
        }

        assert_eq!(index.query("budget").await?.len(), SEARCH_PAGE_SIZE);
        assert!(index.query("roadmap").await?.is_empty());
        Ok(())
    }
}
