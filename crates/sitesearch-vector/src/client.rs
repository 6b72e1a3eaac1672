//! HTTP implementation of the vector-space capability.
//!
//! The provider exposes three endpoints: `index_data`, `clear_vector_space`
//! and `lookup`. Only the fields we consume are modeled here; anything else
//! in the provider's responses is ignored.

use serde::{Deserialize, Serialize};
use tracing::debug;

use sitesearch_core::error::{Error, Result};
use sitesearch_core::traits::VectorStore;
use sitesearch_core::types::{HitAttributes, SemanticHit, VectorRecord};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexDataRequest<'a> {
    vector_space_id: &'a str,
    modality: &'static str,
    attributes: Vec<String>,
    input: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClearVectorSpaceRequest<'a> {
    vector_space_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    vector_space_id: &'a str,
    modality: &'static str,
    top_k: usize,
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    similarity: f64,
    attributes: HitAttributes,
}

/// A vector-space client bound to one space and one bearer token.
///
/// Build code constructs this with the write token; query code with the
/// public token. The token choice is the caller's responsibility and the
/// only thing distinguishing the two paths.
pub struct HttpVectorStore {
    http: reqwest::Client,
    base_url: String,
    vector_space_id: String,
    token: String,
}

impl HttpVectorStore {
    pub fn new(provider_url: &str, vector_space_id: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: provider_url.trim_end_matches('/').to_string(),
            vector_space_id: vector_space_id.to_string(),
            token: token.to_string(),
        }
    }

    fn post(&self, endpoint: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}/{endpoint}", self.base_url))
            .header("Authorization", format!("Bearer {}", self.token))
    }
}

#[async_trait::async_trait]
impl VectorStore for HttpVectorStore {
    async fn ingest(&self, record: VectorRecord) -> Result<()> {
        let attributes = serde_json::to_string(&record.attributes)
            .map_err(|e| Error::Build(format!("serialize attributes: {e}")))?;
        let body = IndexDataRequest {
            vector_space_id: &self.vector_space_id,
            modality: "TEXT",
            attributes: vec![attributes],
            input: vec![&record.data],
        };
        self.post("index_data")
            .json(&body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::Build(format!("index_data: {e}")))?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        debug!(space = %self.vector_space_id, "clearing vector space");
        let body = ClearVectorSpaceRequest {
            vector_space_id: &self.vector_space_id,
        };
        self.post("clear_vector_space")
            .json(&body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::Build(format!("clear_vector_space: {e}")))?;
        Ok(())
    }

    async fn lookup(&self, query: &str, top_k: usize) -> Result<Vec<SemanticHit>> {
        let body = LookupRequest {
            vector_space_id: &self.vector_space_id,
            modality: "TEXT",
            top_k,
            query,
        };
        let response: LookupResponse = self
            .post("lookup")
            .json(&body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::Query(format!("lookup: {e}")))?
            .json()
            .await
            .map_err(|e| Error::Query(format!("lookup response: {e}")))?;
        Ok(response
            .results
            .into_iter()
            .map(|r| SemanticHit {
                similarity: r.similarity,
                attributes: r.attributes,
            })
            .collect())
    }
}
