use std::sync::Arc;

use tracing::error;

use tasklane_core::{AppError, AppResult};
use tasklane_domain::{SEARCH_PAGE_SIZE, SearchDocument};

use crate::SearchIndex;

/// Keyword search over the secondary index.
#[derive(Clone)]
pub struct SearchService {
    search_index: Arc<dyn SearchIndex>,
}

impl SearchService {
    /// Creates a new search service.
    #[must_use]
    pub fn new(search_index: Arc<dyn SearchIndex>) -> Self {
        Self { search_index }
    }

    /// Returns at most ten documents matching `keyword` in index order.
    ///
    /// A blank keyword is a validation error; any index failure surfaces as
    /// a generic internal error.
    pub async fn search(&self, keyword: &str) -> AppResult<Vec<SearchDocument>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(AppError::Validation(
                "query parameter is required".to_owned(),
            ));
        }

        let mut documents = self.search_index.query(keyword).await.map_err(|source| {
            error!(error = %source, "search query failed");
            AppError::Internal("search failed".to_owned())
        })?;
        documents.truncate(SEARCH_PAGE_SIZE);

        Ok(documents)
    }
}
