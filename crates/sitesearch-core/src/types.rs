//! Domain types shared by the index and vector pipelines.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub type DocId = u32;

/// One scanned document record, immutable for the lifetime of a build.
///
/// The scanner hands back three parallel lists per page set (titles,
/// headings, content chunks), so a document's kind is positional; content
/// documents point back at their owning title document through
/// `parent_id`.
///
/// Fields:
/// - `id`: unique within one scan
/// - `parent_id`: id of the owning title document (content/heading only)
/// - `text`: the indexed text payload
/// - `summary`: short display text, when distinct from `text`
/// - `url`: absolute page URL including the site base
/// - `hash`: optional `#anchor` fragment for deep links
/// - `breadcrumb`: ordered path segments from the site root to the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDocument {
    pub id: DocId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<DocId>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default)]
    pub breadcrumb: Vec<String>,
}

/// The scanner's three parallel ordered lists.
///
/// List order is significant: documents for the same page sit at matching
/// relative positions, and the partitioner keeps the three lists in lockstep
/// until its final compaction step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentLists {
    pub titles: Vec<SearchDocument>,
    pub headings: Vec<SearchDocument>,
    pub contents: Vec<SearchDocument>,
}

impl DocumentLists {
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty() && self.headings.is_empty() && self.contents.is_empty()
    }

    /// Total number of documents across all three lists.
    pub fn len(&self) -> usize {
        self.titles.len() + self.headings.len() + self.contents.len()
    }

    /// The lists in scanner order: titles, headings, contents.
    pub fn as_slices(&self) -> [&[SearchDocument]; 3] {
        [&self.titles, &self.headings, &self.contents]
    }
}

/// One site version's scan output plus the directory its index files land in.
#[derive(Debug, Clone)]
pub struct VersionDocuments {
    pub out_dir: PathBuf,
    pub lists: DocumentLists,
}

/// Attribute bag attached to every ingested content chunk.
///
/// `page_title` and `breadcrumb` come from the owning title document and are
/// `None` when the parent id resolves to nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorAttributes {
    pub data: String,
    pub title: Option<String>,
    pub url: String,
    pub hash: Option<String>,
    #[serde(rename = "pageTitle")]
    pub page_title: Option<String>,
    pub breadcrumb: Option<Vec<String>>,
}

/// Payload for one vector-space ingestion call. Write-only from our side:
/// the vector space owns the lifecycle and is cleared and repopulated
/// wholesale on every build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    pub data: String,
    pub attributes: VectorAttributes,
}

/// Attribute bag carried by one raw semantic lookup hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HitAttributes {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(rename = "pageTitle", default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<Vec<String>>,
    #[serde(default)]
    pub data: String,
}

/// One raw result from a vector lookup, one per matched content chunk.
/// Ephemeral: produced per query, consumed by the aggregation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticHit {
    pub similarity: f64,
    pub attributes: HitAttributes,
}

/// One result per distinct URL after aggregation.
///
/// `similarity` carries the strategy's ranking value, so its meaning depends
/// on the configured strategy. `count` is populated by the count strategy
/// only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedResult {
    pub url: String,
    pub title: Option<String>,
    pub similarity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub attributes: HitAttributes,
}

/// One hit from the synchronous keyword channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalHit {
    pub score: f64,
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default)]
    pub breadcrumb: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_roundtrips_with_optional_fields_absent() {
        let json = r#"{"id":3,"text":"Install","url":"/docs/install","breadcrumb":["docs"]}"#;
        let doc: SearchDocument = serde_json::from_str(json).expect("parse");
        assert_eq!(doc.id, 3);
        assert_eq!(doc.parent_id, None);
        assert_eq!(doc.hash, None);
        assert_eq!(doc.breadcrumb, vec!["docs".to_string()]);
    }

    #[test]
    fn vector_attributes_use_camel_case_page_title() {
        let attrs = VectorAttributes {
            data: "body".into(),
            title: Some("Section".into()),
            url: "/docs/a".into(),
            hash: None,
            page_title: Some("Page".into()),
            breadcrumb: Some(vec!["docs".into()]),
        };
        let value = serde_json::to_value(&attrs).expect("serialize");
        assert_eq!(value["pageTitle"], "Page");
    }
}
