//! Rebuilds the search index from the primary store.

use std::sync::Arc;

use tracing::{error, info, warn};

use tasklane_core::AppResult;
use tasklane_domain::SearchDocument;

use crate::{ProjectRepository, SearchIndex, TaskRepository};

/// Counters produced by one resynchronization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Documents accepted by the index.
    pub submitted: usize,
    /// Documents the index rejected or that could not be derived.
    pub failed: usize,
    /// Entity kinds whose enumeration failed.
    pub enumeration_failures: usize,
}

impl SyncReport {
    /// Whether every entity was enumerated and submitted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.enumeration_failures == 0
    }
}

/// Re-submits every project and then every task to the index.
#[derive(Clone)]
pub struct SearchSyncService {
    project_repository: Arc<dyn ProjectRepository>,
    task_repository: Arc<dyn TaskRepository>,
    search_index: Arc<dyn SearchIndex>,
}

impl SearchSyncService {
    /// Creates a new sync service.
    #[must_use]
    pub fn new(
        project_repository: Arc<dyn ProjectRepository>,
        task_repository: Arc<dyn TaskRepository>,
        search_index: Arc<dyn SearchIndex>,
    ) -> Self {
        Self {
            project_repository,
            task_repository,
            search_index,
        }
    }

    /// Runs one full pass. Individual failures are counted, not fatal.
    pub async fn resynchronize(&self) -> SyncReport {
        let mut report = SyncReport::default();

        let projects = self.project_repository.get_all().await.map(|projects| {
            projects
                .iter()
                .map(|project| project.to_search_document())
                .collect::<Vec<_>>()
        });
        self.submit_all("project", projects, &mut report).await;

        let tasks = self.task_repository.get_all().await.map(|tasks| {
            tasks
                .iter()
                .map(|task| task.to_search_document())
                .collect::<Vec<_>>()
        });
        self.submit_all("task", tasks, &mut report).await;

        info!(
            submitted = report.submitted,
            failed = report.failed,
            enumeration_failures = report.enumeration_failures,
            "search resynchronization finished"
        );
        report
    }

    async fn submit_all(
        &self,
        kind: &'static str,
        documents: AppResult<Vec<AppResult<SearchDocument>>>,
        report: &mut SyncReport,
    ) {
        let documents = match documents {
            Ok(documents) => documents,
            Err(source) => {
                error!(error = %source, kind, "failed to enumerate entities");
                report.enumeration_failures += 1;
                return;
            }
        };

        for document in documents {
            let result = match document {
                Ok(document) => self
                    .search_index
                    .submit(&document)
                    .await
                    .map(|()| document.id().to_owned()),
                Err(source) => Err(source),
            };

            match result {
                Ok(document_id) => {
                    report.submitted += 1;
                    info!(kind, document_id = %document_id, "document resubmitted");
                }
                Err(source) => {
                    report.failed += 1;
                    warn!(error = %source, kind, "document resubmission failed");
                }
            }
        }
    }
}
