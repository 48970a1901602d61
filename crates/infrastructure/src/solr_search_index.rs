//! Apache Solr adapter for the search index port.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use tasklane_application::SearchIndex;
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{DocumentType, SEARCH_PAGE_SIZE, SearchDocument};

const RETURNED_FIELDS: &str = "id,type,title,description";

/// Characters with meaning in the Lucene query syntax.
const QUERY_SYNTAX_CHARACTERS: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\', '/',
];

#[derive(Debug, Serialize)]
struct SolrDocument<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    document_type: &'a str,
    title: &'a str,
    description: &'a str,
}

#[derive(Debug, Deserialize)]
struct SelectResponse {
    response: SelectBody,
}

#[derive(Debug, Deserialize)]
struct SelectBody {
    #[serde(default)]
    docs: Vec<Map<String, Value>>,
}

/// Search index backed by one Solr core over HTTP.
#[derive(Clone)]
pub struct SolrSearchIndex {
    client: reqwest::Client,
    core_url: String,
}

impl SolrSearchIndex {
    /// Creates an adapter for `{base_url}/{core}` with a per-request timeout.
    pub fn new(base_url: &str, core: &str, timeout: Duration) -> AppResult<Self> {
        let base_url = Url::parse(base_url).map_err(|error| {
            AppError::Validation(format!("invalid Solr base URL '{base_url}': {error}"))
        })?;
        let core = core.trim();
        if core.is_empty() || core.contains('/') {
            return Err(AppError::Validation(format!(
                "invalid Solr core name '{core}'"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            client,
            core_url: format!("{}/{core}", base_url.as_str().trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl SearchIndex for SolrSearchIndex {
    async fn submit(&self, document: &SearchDocument) -> AppResult<()> {
        let body = [SolrDocument {
            id: document.id(),
            document_type: document.document_type().as_str(),
            title: document.title(),
            description: document.description(),
        }];

        let response = self
            .client
            .post(format!("{}/update", self.core_url))
            .query(&[("commit", "true")])
            .json(&body)
            .send()
            .await
            .map_err(|error| AppError::Internal(format!("failed calling Solr update: {error}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Internal(format!(
                "Solr update returned {status}: {}",
                body.trim()
            )));
        }

        debug!(document_id = %document.id(), "document submitted to Solr");
        Ok(())
    }

    async fn query(&self, keyword: &str) -> AppResult<Vec<SearchDocument>> {
        let rows = SEARCH_PAGE_SIZE.to_string();
        let query = wildcard_query(keyword);

        let response = self
            .client
            .get(format!("{}/select", self.core_url))
            .query(&[
                ("q", query.as_str()),
                ("rows", rows.as_str()),
                ("fl", RETURNED_FIELDS),
                ("wt", "json"),
            ])
            .send()
            .await
            .map_err(|error| AppError::Internal(format!("failed calling Solr select: {error}")))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "Solr select returned {}",
                response.status()
            )));
        }

        let body = response
            .json::<SelectResponse>()
            .await
            .map_err(|error| AppError::Internal(format!("invalid Solr select response: {error}")))?;

        body.response
            .docs
            .into_iter()
            .take(SEARCH_PAGE_SIZE)
            .map(document_from_fields)
            .collect()
    }
}

/// Escapes Lucene syntax and whitespace so the keyword is matched literally.
fn escape_query_term(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for character in keyword.chars() {
        if QUERY_SYNTAX_CHARACTERS.contains(&character) || character.is_whitespace() {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

fn wildcard_query(keyword: &str) -> String {
    let term = escape_query_term(keyword.trim());
    format!("title:*{term}* OR description:*{term}*")
}

/// Reads a stored field, taking the first element of multi-valued fields.
fn field_text(fields: &Map<String, Value>, name: &str) -> Option<String> {
    match fields.get(name)? {
        Value::String(text) => Some(text.clone()),
        Value::Array(values) => values.first().and_then(|value| match value {
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn document_from_fields(fields: Map<String, Value>) -> AppResult<SearchDocument> {
    let id = field_text(&fields, "id")
        .ok_or_else(|| AppError::Internal("Solr document without id".to_owned()))?;
    let document_type = field_text(&fields, "type")
        .ok_or_else(|| AppError::Internal(format!("Solr document '{id}' without type")))?
        .parse::<DocumentType>()
        .map_err(|error| AppError::Internal(error.to_string()))?;

    SearchDocument::new(
        id,
        document_type,
        field_text(&fields, "title").unwrap_or_default(),
        field_text(&fields, "description").unwrap_or_default(),
    )
}
