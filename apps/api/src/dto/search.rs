use serde::{Deserialize, Serialize};
use tasklane_domain::SearchDocument;
use ts_rs::TS;

/// Query string of `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// One search hit.
#[derive(Debug, Serialize, TS)]
pub struct SearchDocumentResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub document_type: String,
    pub title: String,
    pub description: String,
}

impl From<SearchDocument> for SearchDocumentResponse {
    fn from(document: SearchDocument) -> Self {
        Self {
            id: document.id().to_owned(),
            document_type: document.document_type().as_str().to_owned(),
            title: document.title().to_owned(),
            description: document.description().to_owned(),
        }
    }
}
