use crate::error::Result;
use crate::types::{DocumentLists, LocalHit, SearchDocument, SemanticHit, VectorRecord};

/// Produces structured documents from a set of rendered page paths.
/// Tokenization and markup handling live behind this seam.
pub trait DocumentScanner: Send + Sync {
    fn scan(&self, paths: &[std::path::PathBuf]) -> Result<DocumentLists>;
}

/// Turns one partitioned document group into a serializable token index.
///
/// Invoked once per partition with the compacted per-kind groups; the
/// result is written verbatim as one JSON file.
pub trait IndexBuilder: Send + Sync {
    fn build(&self, groups: &[Vec<SearchDocument>]) -> Result<serde_json::Value>;
}

/// Synchronous keyword lookup against an in-memory index already loaded
/// from disk. This is the deterministic half of the hybrid pipeline and
/// must never suspend.
pub trait KeywordSearcher: Send + Sync {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<LocalHit>>;
}

/// The external vector-space capability: content plus attribute bag in,
/// similarity-scored attribute bags out. Modeled as a trait so the pipeline
/// is provider-agnostic; the HTTP client in `sitesearch-vector` is the one
/// production implementation.
#[async_trait::async_trait]
pub trait VectorStore: Send + Sync {
    /// Submit one content chunk. Calls are independent; order between two
    /// ingest calls does not matter, but all must succeed for a build to
    /// count as successful.
    async fn ingest(&self, record: VectorRecord) -> Result<()>;

    /// Drop every record in the target vector space. Must complete before
    /// any ingest call of the same build is dispatched.
    async fn clear(&self) -> Result<()>;

    /// Approximate lookup returning at most `top_k` per-chunk hits.
    async fn lookup(&self, query: &str, top_k: usize) -> Result<Vec<SemanticHit>>;
}
