use axum::Json;
use axum::extract::{Extension, Query, State};
use tracing::debug;

use tasklane_core::UserIdentity;

use crate::dto::{SearchDocumentResponse, SearchQuery};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn search_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<Vec<SearchDocumentResponse>>> {
    let documents = state.search_service.search(params.query.as_str()).await?;
    debug!(
        subject = user.subject(),
        hits = documents.len(),
        "search completed"
    );

    Ok(Json(
        documents
            .into_iter()
            .map(SearchDocumentResponse::from)
            .collect(),
    ))
}
