//! Default token-index builder and the matching in-memory searcher.
//!
//! This is the reference implementation behind the [`IndexBuilder`] seam:
//! a lowercased token posting map with no stemming or language handling.
//! Sites with their own index pipeline plug in at the trait instead.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use sitesearch_core::error::{Error, Result};
use sitesearch_core::traits::{IndexBuilder, KeywordSearcher};
use sitesearch_core::types::{LocalHit, SearchDocument};

pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// One serialized per-kind group: its documents plus a token posting map
/// from token to positions in `documents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexGroup {
    documents: Vec<SearchDocument>,
    tokens: BTreeMap<String, Vec<usize>>,
}

#[derive(Debug, Default)]
pub struct BasicIndexBuilder;

impl BasicIndexBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl IndexBuilder for BasicIndexBuilder {
    fn build(&self, groups: &[Vec<SearchDocument>]) -> Result<serde_json::Value> {
        let index: Vec<IndexGroup> = groups
            .iter()
            .map(|documents| {
                let mut tokens: BTreeMap<String, Vec<usize>> = BTreeMap::new();
                for (position, doc) in documents.iter().enumerate() {
                    for token in tokenize(&doc.text) {
                        let postings = tokens.entry(token).or_default();
                        if postings.last() != Some(&position) {
                            postings.push(position);
                        }
                    }
                }
                IndexGroup {
                    documents: documents.clone(),
                    tokens,
                }
            })
            .collect();
        serde_json::to_value(index).map_err(|e| Error::Build(format!("serialize index: {e}")))
    }
}

/// Keyword lookup over an index file produced by [`BasicIndexBuilder`].
/// Everything is held in memory; `search` never suspends.
#[derive(Debug)]
pub struct BasicKeywordSearcher {
    groups: Vec<IndexGroup>,
}

impl BasicKeywordSearcher {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Build(format!("read index {}: {e}", path.display())))?;
        let groups: Vec<IndexGroup> = serde_json::from_str(&raw)
            .map_err(|e| Error::Build(format!("parse index {}: {e}", path.display())))?;
        Ok(Self { groups })
    }

    pub fn from_index_value(value: serde_json::Value) -> Result<Self> {
        let groups: Vec<IndexGroup> = serde_json::from_value(value)
            .map_err(|e| Error::Build(format!("parse index value: {e}")))?;
        Ok(Self { groups })
    }
}

impl KeywordSearcher for BasicKeywordSearcher {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<LocalHit>> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Ok(vec![]);
        }
        let mut hits = Vec::new();
        for group in &self.groups {
            let mut matched: BTreeMap<usize, usize> = BTreeMap::new();
            for token in &query_tokens {
                if let Some(postings) = group.tokens.get(token) {
                    for &position in postings {
                        *matched.entry(position).or_default() += 1;
                    }
                }
            }
            for (position, token_matches) in matched {
                let doc = &group.documents[position];
                hits.push(LocalHit {
                    score: token_matches as f64 / query_tokens.len() as f64,
                    url: doc.url.clone(),
                    title: doc
                        .summary
                        .clone()
                        .unwrap_or_else(|| doc.text.clone()),
                    hash: doc.hash.clone(),
                    breadcrumb: doc.breadcrumb.clone(),
                });
            }
        }
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(limit);
        Ok(hits)
    }
}
