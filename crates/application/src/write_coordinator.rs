//! Primary-then-index write orchestration.

use std::future::Future;
use std::sync::Arc;

use tracing::warn;

use tasklane_core::{AppError, AppResult};
use tasklane_domain::SearchDocument;

use crate::SearchIndex;

/// Runs the authoritative primary write, then submits the derived search
/// document on a best-effort basis.
///
/// The primary write runs on its own task and completes even if the caller
/// goes away. An index failure is logged at `warn` and never reported to the
/// caller; the resync job restores convergence.
#[derive(Clone)]
pub struct WriteCoordinator {
    search_index: Arc<dyn SearchIndex>,
}

impl WriteCoordinator {
    /// Creates a coordinator that propagates into `search_index`.
    #[must_use]
    pub fn new(search_index: Arc<dyn SearchIndex>) -> Self {
        Self { search_index }
    }

    /// Commits `primary_write`, then submits `document`.
    ///
    /// If the primary write fails the index is never touched.
    pub async fn commit<T, F>(&self, primary_write: F, document: SearchDocument) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let committed = tokio::spawn(primary_write).await.map_err(|error| {
            AppError::Internal(format!("primary store write did not complete: {error}"))
        })??;

        self.submit_best_effort(&document).await;

        Ok(committed)
    }

    /// Submits one document, logging instead of returning failures.
    pub async fn submit_best_effort(&self, document: &SearchDocument) {
        if let Err(error) = self.search_index.submit(document).await {
            warn!(
                error = %error,
                document_id = %document.id(),
                document_type = document.document_type().as_str(),
                "search index submit failed; document left for resync"
            );
        }
    }
}
